//! Whole-document JSON persistence for rings.
//!
//! A snapshot is the complete serialized state of a [`Ring`] — capacity,
//! start offset, live count, and the raw storage array including stale
//! slots — written as a single JSON document. Because the document mirrors
//! the in-memory layout exactly, reload needs no reconstruction logic: the
//! decoded fields are restored verbatim, preserving the exact wraparound
//! position.
//!
//! Saving overwrites the destination file in full; there is no merge and no
//! partial write of the logical window. Loading validates the decoded
//! geometry before handing the ring back, so a corrupted document never
//! replaces good in-memory state.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::SnapshotError;
use crate::ring::Ring;

/// Serializes the entire ring to a JSON document at `path`.
///
/// Any existing file at the path is overwritten.
///
/// # Errors
///
/// - [`SnapshotError::Encode`] if the ring cannot be serialized
/// - [`SnapshotError::Write`] if the file cannot be created or written
pub fn write_snapshot<T, P>(path: P, ring: &Ring<T>) -> Result<(), SnapshotError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let content = serde_json::to_vec(ring).map_err(|e| SnapshotError::Encode { source: e })?;

    fs::write(path, content).map_err(|e| SnapshotError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Reads, decodes, and validates a ring from the JSON document at `path`.
///
/// # Errors
///
/// - [`SnapshotError::Open`] if the file cannot be read; a missing file
///   reports `is_not_found()` and is the expected first-run condition
/// - [`SnapshotError::Decode`] if the document is not valid JSON for the
///   ring shape
/// - [`SnapshotError::Corrupted`] if the decoded fields violate the ring
///   invariants (count over capacity, start out of range, storage length
///   mismatch, zero capacity)
pub fn read_snapshot<T, P>(path: P) -> Result<Ring<T>, SnapshotError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let data = fs::read_to_string(path).map_err(|e| SnapshotError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let ring: Ring<T> = serde_json::from_str(&data).map_err(|e| SnapshotError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    ring.validate().map_err(|reason| SnapshotError::Corrupted {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(ring)
}
