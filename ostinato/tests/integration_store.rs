//! Integration tests for the full store lifecycle.
//!
//! These exercise the complete flow a hosting service performs: construct,
//! hydrate from a snapshot, ingest past the wraparound point, save, and
//! restore after a simulated restart.

use std::sync::Arc;
use std::thread;

use ostinato::{ActivityRecord, RingStore};
use tempfile::tempdir;

/// Helper to build a record with the given date label.
fn record(date: &str, keyboard: u64, mouse: u64) -> ActivityRecord {
    ActivityRecord::new(date, keyboard, mouse)
}

#[test]
fn test_full_store_lifecycle() {
    let temp_dir = tempdir().unwrap();
    let snapshot_path = temp_dir.path().join("activity.json");

    // Phase 1: ingest past the wraparound point and save.
    {
        let store = RingStore::new(4).unwrap();

        for i in 0u64..6 {
            store.append(record(&format!("2024-03-0{} 12:00:00", i + 1), i * 10, i));
        }

        assert_eq!(store.len(), 4, "window never exceeds capacity");
        store.save(&snapshot_path).unwrap();
    }

    // Phase 2: a fresh process restores the identical window.
    {
        let store = RingStore::<ActivityRecord>::new(4).unwrap();
        store.load(&snapshot_path).unwrap();

        let window = store.get();
        assert_eq!(window.len(), 4);

        // The last four appends survive, oldest first.
        let dates: Vec<&str> = window.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-03-03 12:00:00",
                "2024-03-04 12:00:00",
                "2024-03-05 12:00:00",
                "2024-03-06 12:00:00",
            ]
        );
        assert_eq!(window[0].keyboard_events, 20);
        assert_eq!(window[3].keyboard_events, 50);
    }
}

#[test]
fn test_appends_below_capacity_preserve_order() {
    let store = RingStore::new(10).unwrap();

    for i in 0..7 {
        store.append(i);
    }

    assert_eq!(store.get(), (0..7).collect::<Vec<_>>());
}

#[test]
fn test_appends_beyond_capacity_keep_last_window() {
    let store = RingStore::new(10).unwrap();

    for i in 0..95 {
        store.append(i);
    }

    let window = store.get();
    assert_eq!(window.len(), 10);
    assert_eq!(window, (85..95).collect::<Vec<_>>());
}

#[test]
fn test_capacity_three_scenario() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("abcd.json");

    let store = RingStore::new(3).unwrap();
    store.append("A");
    store.append("B");
    store.append("C");
    store.append("D");

    assert_eq!(store.get(), vec!["B", "C", "D"]);

    store.save(&path).unwrap();

    let restored = RingStore::<String>::new(3).unwrap();
    restored.load(&path).unwrap();
    assert_eq!(restored.get(), vec!["B", "C", "D"]);
}

#[test]
fn test_empty_store_round_trip() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("empty.json");

    let store = RingStore::<ActivityRecord>::new(5).unwrap();
    assert!(store.get().is_empty(), "fresh store yields an empty sequence");

    store.save(&path).unwrap();

    let restored = RingStore::<ActivityRecord>::new(5).unwrap();
    restored.load(&path).unwrap();

    assert!(restored.get().is_empty());
    assert_eq!(restored.capacity(), 5);
    assert_eq!(restored.len(), 0);
}

#[test]
fn test_load_from_nonexistent_path() {
    let temp_dir = tempdir().unwrap();

    let store = RingStore::<ActivityRecord>::new(5).unwrap();
    let err = store.load(temp_dir.path().join("never_saved.json")).unwrap_err();

    assert!(err.is_not_found(), "missing snapshot classifies as not-found");
    assert!(store.get().is_empty(), "store is still freshly constructed and empty");
    assert_eq!(store.capacity(), 5);
}

#[test]
fn test_read_idempotence() {
    let store = RingStore::new(3).unwrap();
    store.append(record("2024-03-01 12:00:00", 1, 2));
    store.append(record("2024-03-02 12:00:00", 3, 4));

    let mut first = store.get();
    let second = store.get();
    assert_eq!(first, second);

    first[0].keyboard_events = 999;
    first.clear();

    assert_eq!(store.get(), second, "mutating one result affects neither the other nor the store");
}

#[test]
fn test_concurrent_ingest_with_saves() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("concurrent.json");
    let store = Arc::new(RingStore::new(32).unwrap());

    // Writers append and save after every append, the way the ingestion
    // surface does; a reader polls the window throughout.
    let writers: Vec<_> = (0..4u64)
        .map(|t| {
            let store = Arc::clone(&store);
            let path = path.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    store.append(record("2024-03-01 12:00:00", t, i));
                    store.save(&path).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..200 {
                assert!(store.get().len() <= 32);
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    reader.join().unwrap();

    // The file on disk is one of the completed encodes: it decodes cleanly
    // and holds a full, consistent window.
    let restored = RingStore::<ActivityRecord>::new(32).unwrap();
    restored.load(&path).unwrap();
    assert_eq!(restored.len(), 32);
}
