//! Error types for the ostinato ring store.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all ostinato operations.
///
/// Covers every failure a store can report, from construction through
/// snapshot persistence. No error in this crate terminates the hosting
/// process; callers are expected to log and carry on with whatever
/// in-memory state they have.
#[derive(Error, Debug)]
pub enum OstinatoError {
    /// Error from the ring structure itself.
    #[error("ring error: {0}")]
    Ring(#[from] RingError),

    /// Error during snapshot persistence (save/load).
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl OstinatoError {
    /// Returns `true` if this error is a missing snapshot file.
    ///
    /// A missing snapshot is the normal first-run condition: the store has
    /// simply never been saved. Callers use this to pick a log level, not
    /// to branch control flow.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Snapshot(s) if s.is_not_found())
    }
}

/// Errors reported by the ring structure.
#[derive(Error, Debug)]
pub enum RingError {
    /// The requested capacity cannot back a ring.
    ///
    /// Slot arithmetic is modular in the capacity, so a zero capacity is
    /// rejected at construction rather than clamped or deferred.
    #[error("invalid capacity {capacity} (must be greater than zero)")]
    InvalidCapacity {
        /// The rejected capacity value.
        capacity: usize,
    },
}

/// Errors that can occur while saving or loading a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be opened or read.
    #[error("failed to read snapshot '{}': {source}", path.display())]
    Open {
        /// The snapshot file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file could not be created or written.
    #[error("failed to write snapshot '{}': {source}", path.display())]
    Write {
        /// The snapshot file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The in-memory state could not be serialized to JSON.
    #[error("failed to encode snapshot: {source}")]
    Encode {
        /// The underlying JSON serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot document is not valid JSON for the expected shape.
    #[error("failed to decode snapshot '{}': {source}", path.display())]
    Decode {
        /// The snapshot file path.
        path: PathBuf,
        /// The underlying JSON parsing error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot decoded cleanly but its geometry is impossible.
    ///
    /// Restoring such a document would leave the ring with indices that
    /// later appends cannot honor, so it is rejected and the prior
    /// in-memory state is kept.
    #[error("snapshot '{}' is corrupted: {reason}", path.display())]
    Corrupted {
        /// The snapshot file path.
        path: PathBuf,
        /// Description of the invariant violation.
        reason: String,
    },
}

impl SnapshotError {
    /// Returns `true` if this error is a missing snapshot file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Open { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Type alias for `Result<T, OstinatoError>`.
pub type Result<T> = std::result::Result<T, OstinatoError>;
