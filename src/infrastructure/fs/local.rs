//! Local File System Implementation
//!
//! Implements the SourceFileSystem port for local disk operations.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::entities::{ModMarker, Snapshot};
use crate::domain::ports::SourceFileSystem;
use crate::error::{WampaError, WampaResult};

/// Permission bits for the generated output file
#[cfg(unix)]
pub const OUTPUT_MODE: u32 = 0o644;

/// Local file system implementation
///
/// Provides canonical path resolution, metadata snapshots and atomic writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl SourceFileSystem for LocalFs {
    fn resolve(&self, path: &Path) -> WampaResult<PathBuf> {
        let resolution = |source| WampaError::Resolution {
            path: path.to_path_buf(),
            source,
        };

        match path.canonicalize() {
            Ok(canonical) => Ok(canonical),
            // Not created yet; watch the absolute location so it shows up as new.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                std::path::absolute(path).map_err(resolution)
            }
            Err(e) => Err(resolution(e)),
        }
    }

    fn snapshot(&self, resolved: &Path) -> WampaResult<Snapshot> {
        match fs::metadata(resolved) {
            Ok(meta) => Ok(Snapshot::present(
                resolved,
                ModMarker::new(meta.modified().ok(), meta.len()),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Snapshot::missing(resolved)),
            Err(e) => Err(WampaError::Resolution {
                path: resolved.to_path_buf(),
                source: e,
            }),
        }
    }

    fn read(&self, path: &Path) -> WampaResult<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> WampaResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        // Temp file lives next to the target so the rename stays on one filesystem.
        let mut tmp = NamedTempFile::new_in(&parent)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))?;
        }

        tmp.persist(path).map_err(|e| WampaError::Io(e.error))?;
        Ok(())
    }
}
