//! Microbenchmarks for the append/read/save paths.
//!
//! Run with: `cargo bench -p ostinato -- append`

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ostinato::{ActivityRecord, RingStore};
use tempfile::tempdir;

/// Creates a store pre-filled to the wraparound regime.
fn setup_store(capacity: usize) -> RingStore<ActivityRecord> {
    let store = RingStore::new(capacity).unwrap();
    for i in 0..capacity * 2 {
        store.append(ActivityRecord::new(
            "2024-03-01 12:00:00",
            i as u64,
            i as u64,
        ));
    }
    store
}

fn bench_append(c: &mut Criterion) {
    let store = setup_store(2880);
    let record = ActivityRecord::new("2024-03-01 12:00:00", 120, 45);

    c.bench_function("append/full_ring", |b| {
        b.iter(|| {
            store.append(black_box(record.clone()));
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let store = setup_store(2880);

    c.bench_function("get/full_ring", |b| {
        b.iter(|| {
            let window = store.get();
            black_box(window.len());
        });
    });
}

fn bench_save(c: &mut Criterion) {
    let store = setup_store(2880);
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.json");

    c.bench_function("save/full_ring", |b| {
        b.iter(|| {
            store.save(black_box(&path)).unwrap();
        });
    });
}

criterion_group!(benches, bench_append, bench_get, bench_save);
criterion_main!(benches);
