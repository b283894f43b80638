//! Change entity and watcher event

use std::path::PathBuf;

/// Kind of transition between two snapshot tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    New,
    Modified,
    /// Signaling only; never turned into an event
    Removed,
}

/// One detected transition for one path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Change {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl Change {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// "Something changed, re-read" trigger delivered by a watcher.
///
/// Carries no content; consumers always re-read the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub path: PathBuf,
    pub is_remote: bool,
}

impl SourceEvent {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_remote: false,
        }
    }
}
