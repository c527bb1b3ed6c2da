//! # ostinato
//!
//! Bounded in-memory telemetry ring store with JSON snapshot persistence.
//!
//! ostinato is a Rust library for retaining the most recent fixed-size
//! window of small telemetry records in memory and persisting that window
//! to disk as a single JSON document, so it survives process restarts. It
//! backs an HTTP ingestion service for keyboard/mouse activity counters,
//! but the store is generic over the element type.
//!
//! ## Key Properties
//!
//! - Fixed capacity, overwrite-oldest-on-full — storage is bounded by
//!   configuration, not data volume
//! - One coarse lock over the whole store: appends, reads, and snapshot
//!   I/O all observe a consistent state, wraparound included
//! - Whole-document persistence that mirrors the in-memory layout exactly,
//!   so reload restores the wraparound position verbatim
//! - Reads return copies; internal storage is never aliased
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ostinato::{ActivityRecord, RingStore};
//!
//! # fn main() -> ostinato::Result<()> {
//! // One slot per two-minute-equivalent granularity over a day.
//! let store: RingStore<ActivityRecord> = RingStore::new(24 * 60 * 2)?;
//!
//! // Hydrate from the last snapshot; a missing file is a normal first run.
//! if let Err(e) = store.load("key_mouse_events.json") {
//!     if !e.is_not_found() {
//!         eprintln!("snapshot not restored: {e}");
//!     }
//! }
//!
//! store.append(ActivityRecord::new("2024-03-01 12:00:00", 120, 45));
//! store.save("key_mouse_events.json")?;
//!
//! for record in store.get() {
//!     println!("{}: kbd={} mouse={}", record.date, record.keyboard_events, record.mouse_events);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`RingStore`] — the shared, mutex-guarded store; the public API
//! - [`Ring`] — the plain fixed-capacity overwrite-on-full sequence
//! - [`ActivityRecord`] — the canonical telemetry element type
//! - [`snapshot`] — whole-document JSON save/load
//!
//! ## Modules
//!
//! For lower-level access, the individual modules are also public:
//!
//! - [`store`] — the synchronized store
//! - [`ring`] — ring semantics and invariants
//! - [`snapshot`] — snapshot encode/decode/validate
//! - [`record`] — the activity record
//! - [`error`] — error types

pub mod error;
pub mod record;
pub mod ring;
pub mod snapshot;
pub mod store;

// Re-export primary API types at crate root for convenience.
pub use error::{OstinatoError, Result};
pub use record::ActivityRecord;
pub use ring::Ring;
pub use store::RingStore;
