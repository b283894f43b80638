//! Snapshot Differ
//!
//! Compares two full snapshot tables and reports what changed. Pure and
//! total: no I/O, no errors.

use crate::domain::entities::{Change, ChangeKind, SnapshotTable, SourceEvent};

/// Compare `current` against `previous`.
///
/// - path only in `current` → `New`
/// - path in both with unequal snapshots → `Modified`
/// - path only in `previous` → `Removed`
///
/// The order of the returned list is unspecified.
pub fn diff(current: &SnapshotTable, previous: &SnapshotTable) -> Vec<Change> {
    let mut changes = Vec::new();

    for (path, snapshot) in current {
        match previous.get(path) {
            None => changes.push(Change::new(path.clone(), ChangeKind::New)),
            Some(prev) if prev != snapshot => {
                changes.push(Change::new(path.clone(), ChangeKind::Modified))
            }
            Some(_) => {}
        }
    }

    for path in previous.keys() {
        if !current.contains_key(path) {
            changes.push(Change::new(path.clone(), ChangeKind::Removed));
        }
    }

    changes
}

/// Turn changes into watcher events, dropping `Removed` entries.
pub fn events_from_changes(changes: &[Change]) -> Vec<SourceEvent> {
    changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Removed)
        .map(|c| SourceEvent::local(c.path.clone()))
        .collect()
}
