//! Thread-safe ring store with snapshot persistence.
//!
//! This module provides the public face of the crate: [`RingStore`], a
//! [`Ring`] guarded by a single mutex. Every operation (append, read,
//! save, load) takes that one lock for its full duration, so no caller
//! ever observes a half-written slot or a wraparound in progress.
//!
//! # Concurrency
//!
//! The locking is deliberately coarse. Operations are cheap (bounded by the
//! fixed capacity) and the store is shared across request-handling threads
//! where torn reads across a wraparound would corrupt ordering, so one lock
//! over the whole structure is the right trade. File I/O inside
//! [`RingStore::save`] and [`RingStore::load`] blocks the calling thread and
//! holds the lock for that single call only; nothing waits on the network or
//! on another store while holding it.
//!
//! The mutex is runtime-only state. It is not part of the serialized
//! representation — a snapshot carries capacity, start, count, and storage,
//! and the lock is reconstructed fresh by whoever owns the store.
//!
//! # Sharing
//!
//! Construct the store once at process start and hand an
//! `Arc<RingStore<T>>` to whatever serves requests:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ostinato::{ActivityRecord, RingStore};
//!
//! # fn main() -> ostinato::Result<()> {
//! let store: Arc<RingStore<ActivityRecord>> = Arc::new(RingStore::new(2880)?);
//!
//! if let Err(e) = store.load("key_mouse_events.json") {
//!     // Missing file is the normal first run; anything else is worth a log.
//!     if !e.is_not_found() {
//!         eprintln!("snapshot not restored: {e}");
//!     }
//! }
//!
//! store.append(ActivityRecord::new("2024-03-01 12:00:00", 120, 45));
//! store.save("key_mouse_events.json")?;
//! assert_eq!(store.get().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::ring::Ring;
use crate::snapshot;

/// A fixed-capacity, overwrite-on-full store safe to share across threads.
///
/// All methods take `&self`; interior mutability is provided by the single
/// internal mutex. See the [module docs](self) for the locking discipline.
#[derive(Debug)]
pub struct RingStore<T> {
    ring: Mutex<Ring<T>>,
}

impl<T> RingStore<T> {
    /// Creates an empty store with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`](crate::error::RingError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self>
    where
        T: Clone + Default,
    {
        Ok(Self {
            ring: Mutex::new(Ring::new(capacity)?),
        })
    }

    /// Acquires the store lock.
    ///
    /// A poisoned lock is recovered: every mutation is a single slot
    /// assignment plus counter updates, so a panicked holder cannot leave
    /// the ring structurally invalid.
    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an item as the newest element, evicting the oldest when full.
    ///
    /// Atomic with respect to concurrent `append`, `get`, `save`, and
    /// `load` calls on the same store.
    pub fn append(&self, item: T) {
        self.lock().push(item);
    }

    /// Returns a fresh copy of the live elements, oldest first.
    ///
    /// The result never aliases internal storage: mutating it affects
    /// neither the store nor any other result. An empty store yields an
    /// empty vector.
    pub fn get(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().to_vec()
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the store holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Serializes the entire store state to a JSON document at `path`.
    ///
    /// The lock is held for the full encode-and-write, so the file always
    /// reflects one consistent state; concurrent saves serialize and the
    /// file reflects whichever completed last. Any existing file is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`](crate::error::SnapshotError) if encoding
    /// fails or the destination cannot be written. Callers should log and
    /// continue; the in-memory state is unaffected.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        T: Serialize,
    {
        let ring = self.lock();
        snapshot::write_snapshot(path, &ring)?;
        Ok(())
    }

    /// Replaces the entire store state with the snapshot at `path`.
    ///
    /// Capacity, start offset, live count, and storage are all restored
    /// verbatim from the document. The lock is held across the read,
    /// decode, and swap. On any failure the prior in-memory state is left
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`](crate::error::SnapshotError); a missing
    /// file reports `is_not_found()` and is the expected first-run
    /// condition.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        T: DeserializeOwned,
    {
        let mut ring = self.lock();
        *ring = snapshot::read_snapshot(path)?;
        Ok(())
    }
}
