//! Fixed-capacity ring with overwrite-on-full semantics.
//!
//! This module provides the plain, unsynchronized core of the store: a
//! sequence of at most `cap` elements where appending to a full ring evicts
//! exactly the single oldest element. The synchronized wrapper lives in
//! [`crate::store`].
//!
//! # Design
//!
//! The ring keeps four pieces of state and nothing else:
//!
//! - `buffer` — underlying storage, always exactly `cap` slots long
//! - `cap` — capacity, fixed at construction
//! - `start` — physical index of the oldest live element
//! - `count` — number of live elements, `0 ≤ count ≤ cap`
//!
//! An append lands in physical slot `(start + count) % cap` (computed with
//! the pre-increment count). Below capacity the count grows; at capacity the
//! slot being written is the one holding the oldest element, so `start`
//! advances instead and the oldest is evicted.
//!
//! Slots outside the live window hold stale (previously overwritten or
//! default-initialized) values. They are never exposed by any read
//! operation, but they are part of the serialized representation: the
//! snapshot mirrors the in-memory layout exactly so reload restores the
//! wraparound position verbatim instead of reconstructing it.

use serde::{Deserialize, Serialize};

use crate::error::RingError;

/// A fixed-capacity sequence that overwrites its oldest element when full.
///
/// `Ring` is single-threaded; it is the data carried inside
/// [`RingStore`](crate::store::RingStore), which adds the locking. The serde
/// representation is the on-disk snapshot format — four fields, no
/// concurrency primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ring<T> {
    /// Underlying storage, length always equal to `cap`.
    buffer: Vec<T>,
    /// Fixed capacity.
    cap: usize,
    /// Physical index of the oldest live element.
    start: usize,
    /// Number of live elements.
    count: usize,
}

impl<T> Ring<T> {
    /// Creates an empty ring with the given capacity.
    ///
    /// Storage is allocated eagerly and default-initialized so the buffer
    /// always has exactly `capacity` slots, matching the snapshot format.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, RingError>
    where
        T: Clone + Default,
    {
        if capacity == 0 {
            return Err(RingError::InvalidCapacity { capacity });
        }

        Ok(Self {
            buffer: vec![T::default(); capacity],
            cap: capacity,
            start: 0,
            count: 0,
        })
    }

    /// Appends an element, evicting the oldest if the ring is full.
    pub fn push(&mut self, item: T) {
        let slot = (self.start + self.count) % self.cap;
        self.buffer[slot] = item;

        if self.count < self.cap {
            self.count += 1;
        } else {
            self.start = (self.start + 1) % self.cap;
        }
    }

    /// Returns an iterator over the live elements, oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            offset: 0,
        }
    }

    /// Materializes the live elements as a fresh vector, oldest first.
    ///
    /// The result shares no storage with the ring; mutating it has no
    /// effect on the ring or on other results.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the number of live elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the ring holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if the next append will evict the oldest element.
    pub fn is_full(&self) -> bool {
        self.count == self.cap
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the physical index of the oldest live element.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Checks the structural invariants of a decoded ring.
    ///
    /// Construction through [`Ring::new`] upholds these by itself; this
    /// exists for rings decoded from external snapshot documents, where the
    /// four fields arrive independently and must be cross-checked before
    /// any slot arithmetic runs against them.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.cap == 0 {
            return Err("capacity is zero".to_string());
        }
        if self.buffer.len() != self.cap {
            return Err(format!(
                "storage length {} does not match capacity {}",
                self.buffer.len(),
                self.cap
            ));
        }
        if self.count > self.cap {
            return Err(format!(
                "live count {} exceeds capacity {}",
                self.count, self.cap
            ));
        }
        if self.start >= self.cap {
            return Err(format!(
                "start offset {} is outside capacity {}",
                self.start, self.cap
            ));
        }
        Ok(())
    }
}

/// Iterator over a ring's live elements in insertion order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    ring: &'a Ring<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.ring.count {
            return None;
        }

        let slot = (self.ring.start + self.offset) % self.ring.cap;
        self.offset += 1;
        Some(&self.ring.buffer[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ring.count - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = Ring::<u32>::new(0);
        assert!(matches!(
            result,
            Err(RingError::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn test_empty_ring() {
        let ring = Ring::<u32>::new(5).unwrap();

        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 5);
        assert_eq!(ring.to_vec(), Vec::<u32>::new());
    }

    #[test]
    fn test_push_below_capacity() {
        let mut ring = Ring::new(5).unwrap();

        ring.push(1);
        ring.push(2);
        ring.push(3);

        assert_eq!(ring.len(), 3);
        assert!(!ring.is_full());
        assert_eq!(ring.start(), 0);
        assert_eq!(ring.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_push_at_capacity_evicts_oldest() {
        let mut ring = Ring::new(3).unwrap();

        ring.push("a");
        ring.push("b");
        ring.push("c");
        assert!(ring.is_full());

        ring.push("d");

        assert_eq!(ring.len(), 3, "length never exceeds capacity");
        assert_eq!(ring.start(), 1, "start advances past the evicted slot");
        assert_eq!(ring.to_vec(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_wraparound_many_times() {
        let mut ring = Ring::new(3).unwrap();

        for i in 0..10 {
            ring.push(i);
        }

        // The last three appends survive, oldest first.
        assert_eq!(ring.to_vec(), vec![7, 8, 9]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_capacity_one() {
        let mut ring = Ring::new(1).unwrap();

        ring.push(1);
        assert_eq!(ring.to_vec(), vec![1]);

        ring.push(2);
        assert_eq!(ring.to_vec(), vec![2]);
    }

    #[test]
    fn test_iter_matches_to_vec() {
        let mut ring = Ring::new(4).unwrap();
        for i in 0..6 {
            ring.push(i);
        }

        let from_iter: Vec<i32> = ring.iter().copied().collect();
        assert_eq!(from_iter, ring.to_vec());
        assert_eq!(ring.iter().len(), 4);
    }

    #[test]
    fn test_validate_accepts_constructed_ring() {
        let mut ring = Ring::new(3).unwrap();
        ring.push(1);
        ring.push(2);
        ring.push(3);
        ring.push(4);

        assert!(ring.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        // Build impossible rings by deserializing raw documents.
        let count_over_cap: Ring<u32> =
            serde_json::from_str(r#"{"buffer":[0,0],"cap":2,"start":0,"count":5}"#).unwrap();
        assert!(count_over_cap.validate().is_err());

        let start_out_of_range: Ring<u32> =
            serde_json::from_str(r#"{"buffer":[0,0],"cap":2,"start":2,"count":1}"#).unwrap();
        assert!(start_out_of_range.validate().is_err());

        let short_buffer: Ring<u32> =
            serde_json::from_str(r#"{"buffer":[0],"cap":2,"start":0,"count":1}"#).unwrap();
        assert!(short_buffer.validate().is_err());

        let zero_cap: Ring<u32> =
            serde_json::from_str(r#"{"buffer":[],"cap":0,"start":0,"count":0}"#).unwrap();
        assert!(zero_cap.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_wraparound() {
        let mut ring = Ring::new(3).unwrap();
        for i in 0..5 {
            ring.push(i);
        }

        let json = serde_json::to_string(&ring).unwrap();
        let restored: Ring<i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.capacity(), ring.capacity());
        assert_eq!(restored.start(), ring.start());
        assert_eq!(restored.len(), ring.len());
        assert_eq!(restored.to_vec(), ring.to_vec());
    }

    #[test]
    fn test_snapshot_document_shape() {
        let mut ring = Ring::new(2).unwrap();
        ring.push(7);

        let doc: serde_json::Value = serde_json::to_value(&ring).unwrap();
        assert_eq!(doc["cap"], 2);
        assert_eq!(doc["start"], 0);
        assert_eq!(doc["count"], 1);
        // The raw storage array is persisted in full, stale slots included.
        assert_eq!(doc["buffer"].as_array().unwrap().len(), 2);
    }
}
