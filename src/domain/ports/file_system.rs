//! SourceFileSystem port - what the watchers and the orchestrator need from disk
//!
//! Implementations:
//! - `LocalFs` - standard file I/O
//! - `MockFileSystem` (tests) - in-memory states and injected errors

use std::path::{Path, PathBuf};

use crate::domain::entities::{Snapshot, SnapshotTable};
use crate::error::{WampaError, WampaResult};

/// Abstract file system interface for local sources
pub trait SourceFileSystem: Send + Sync {
    /// Turn a configured path into its canonical absolute form
    fn resolve(&self, path: &Path) -> WampaResult<PathBuf>;

    /// Observe the current state of an already resolved path.
    ///
    /// A missing file is a snapshot with `exists == false`, not an error.
    fn snapshot(&self, resolved: &Path) -> WampaResult<Snapshot>;

    /// Read a local source's raw bytes
    fn read(&self, path: &Path) -> WampaResult<Vec<u8>>;

    /// Replace `path` with `content` so readers never see a partial file
    fn write_atomic(&self, path: &Path, content: &[u8]) -> WampaResult<()>;
}

/// Resolve every path, failing on the first one that cannot be resolved.
///
/// Used at watch start where partial success is not allowed.
pub fn resolve_all(fs: &dyn SourceFileSystem, paths: &[PathBuf]) -> WampaResult<Vec<PathBuf>> {
    paths.iter().map(|p| fs.resolve(p)).collect()
}

/// Snapshot every resolved path, failing on the first error.
pub fn snapshot_all(fs: &dyn SourceFileSystem, resolved: &[PathBuf]) -> WampaResult<SnapshotTable> {
    let mut table = SnapshotTable::with_capacity(resolved.len());
    for path in resolved {
        table.insert(path.clone(), fs.snapshot(path)?);
    }
    Ok(table)
}

/// Snapshot every resolved path, dropping the ones that fail.
///
/// Failures are returned alongside so the caller can report them; the
/// returned table never holds an entry for a failed path.
pub fn snapshot_available(
    fs: &dyn SourceFileSystem,
    resolved: &[PathBuf],
) -> (SnapshotTable, Vec<WampaError>) {
    let mut table = SnapshotTable::with_capacity(resolved.len());
    let mut errors = Vec::new();
    for path in resolved {
        match fs.snapshot(path) {
            Ok(snapshot) => {
                table.insert(path.clone(), snapshot);
            }
            Err(e) => errors.push(e),
        }
    }
    (table, errors)
}
