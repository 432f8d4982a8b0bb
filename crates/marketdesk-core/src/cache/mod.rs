//! Local snapshot cache.
//!
//! One report bundle is kept per client in a single overwritable slot,
//! together with the time it was captured and the geography it covers.
//! A snapshot is reused only on the calendar day it was captured.

pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
