//! Domain Entities
//!
//! Core domain objects with identity and lifecycle.

mod change;
mod snapshot;

pub use change::{Change, ChangeKind, SourceEvent};
pub use snapshot::{ModMarker, Snapshot, SnapshotTable};
