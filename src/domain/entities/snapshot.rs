//! Snapshot entity
//!
//! The minimal observable state of one local source, used only to answer
//! "did this change since last time".

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Opaque modification marker.
///
/// Only compared for equality. Carries the modification time and the file
/// length so that coarse timestamp filesystems still notice size changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModMarker {
    modified: Option<SystemTime>,
    len: u64,
}

impl ModMarker {
    pub fn new(modified: Option<SystemTime>, len: u64) -> Self {
        Self { modified, len }
    }
}

/// Observable state of one source at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub path: PathBuf,
    pub exists: bool,
    pub marker: ModMarker,
}

impl Snapshot {
    /// Snapshot of an existing file
    pub fn present(path: impl Into<PathBuf>, marker: ModMarker) -> Self {
        Self {
            path: path.into(),
            exists: true,
            marker,
        }
    }

    /// Snapshot of a path that currently has no file behind it
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exists: false,
            marker: ModMarker::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Last known snapshot per resolved path
pub type SnapshotTable = HashMap<PathBuf, Snapshot>;
