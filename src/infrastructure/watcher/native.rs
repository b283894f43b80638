//! Native-event watcher
//!
//! Subscribes the parent directory of every watched file to the host's
//! notification facility (inotify, FSEvents/kqueue, ReadDirectoryChangesW)
//! and emits an event for each write-class notification that touches a
//! watched file. Watching the directory rather than the file keeps working
//! across editors that save by rename, and lets a missing file appear later.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use notify::event::{AccessKind, MetadataKind, ModifyKind};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::domain::entities::SourceEvent;
use crate::domain::ports::{resolve_all, SourceFileSystem, SourceWatcher};
use crate::error::{WampaError, WampaResult};
use crate::infrastructure::fs::LocalFs;

/// Event path (as the OS may report it) → resolved watched path
type TargetMap = HashMap<PathBuf, PathBuf>;

struct NativeState {
    watcher: RecommendedWatcher,
    dirs: Vec<PathBuf>,
    watching: bool,
}

/// Watcher backed by OS file notifications
pub struct NativeWatcher {
    fs: Arc<dyn SourceFileSystem>,
    rx: Receiver<SourceEvent>,
    targets: Arc<RwLock<TargetMap>>,
    state: Mutex<NativeState>,
}

impl NativeWatcher {
    /// Build the notification backend. Fails if the host facility is unavailable.
    pub fn new(capacity: usize) -> WampaResult<Self> {
        Self::with_fs(Arc::new(LocalFs::new()), capacity)
    }

    pub fn with_fs(fs: Arc<dyn SourceFileSystem>, capacity: usize) -> WampaResult<Self> {
        let (tx, rx) = bounded(capacity);
        let targets: Arc<RwLock<TargetMap>> = Arc::new(RwLock::new(HashMap::new()));

        let handler_targets = Arc::clone(&targets);
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => dispatch(&event, &handler_targets, &tx),
                Err(e) => warn!(error = %e, "native watcher error"),
            },
            Config::default(),
        )?;

        Ok(Self {
            fs,
            rx,
            targets,
            state: Mutex::new(NativeState {
                watcher,
                dirs: Vec::new(),
                watching: false,
            }),
        })
    }
}

/// Create and modify notifications count as writes; access and pure
/// access-time updates do not.
pub(crate) fn is_write_class(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(AccessKind::Close(notify::event::AccessMode::Write)) => true,
        _ => false,
    }
}

fn dispatch(event: &Event, targets: &RwLock<TargetMap>, tx: &Sender<SourceEvent>) {
    if !is_write_class(&event.kind) {
        return;
    }
    let Ok(targets) = targets.read() else {
        return;
    };

    let mut seen = HashSet::new();
    for path in &event.paths {
        let Some(resolved) = targets.get(path) else {
            continue;
        };
        if !seen.insert(resolved.clone()) {
            continue;
        }
        match tx.try_send(SourceEvent::local(resolved.clone())) {
            Ok(()) => debug!(path = %resolved.display(), "native change"),
            Err(TrySendError::Full(_)) => {
                warn!(path = %resolved.display(), "event channel is full, dropping event")
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

/// Every spelling under which the OS may report `resolved`.
fn target_aliases(resolved: &Path) -> Vec<PathBuf> {
    let mut aliases = vec![resolved.to_path_buf()];
    if let (Some(parent), Some(name)) = (resolved.parent(), resolved.file_name()) {
        if let Ok(canonical_parent) = parent.canonicalize() {
            let alias = canonical_parent.join(name);
            if alias != resolved {
                aliases.push(alias);
            }
        }
    }
    aliases
}

impl SourceWatcher for NativeWatcher {
    fn start(&self, paths: &[PathBuf]) -> WampaResult<()> {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if state.watching {
            return Err(WampaError::AlreadyWatching);
        }

        let resolved = resolve_all(self.fs.as_ref(), paths)?;

        let mut map = TargetMap::new();
        let mut dirs: Vec<PathBuf> = Vec::new();
        for path in &resolved {
            for alias in target_aliases(path) {
                map.insert(alias, path.clone());
            }
            if let Some(parent) = path.parent() {
                if !dirs.iter().any(|d| d == parent) {
                    dirs.push(parent.to_path_buf());
                }
            }
        }

        let mut subscribed: Vec<PathBuf> = Vec::with_capacity(dirs.len());
        for dir in &dirs {
            if let Err(e) = state.watcher.watch(dir, RecursiveMode::NonRecursive) {
                // All or nothing.
                for done in &subscribed {
                    let _ = state.watcher.unwatch(done);
                }
                return Err(match e.kind {
                    notify::ErrorKind::Io(source) => WampaError::Resolution {
                        path: dir.clone(),
                        source,
                    },
                    notify::ErrorKind::PathNotFound => WampaError::Resolution {
                        path: dir.clone(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "directory does not exist",
                        ),
                    },
                    kind => WampaError::Watcher(notify::Error::new(kind)),
                });
            }
            subscribed.push(dir.clone());
        }

        *self.targets.write().unwrap_or_else(|p| p.into_inner()) = map;
        state.dirs = subscribed;
        state.watching = true;
        Ok(())
    }

    fn events(&self) -> Receiver<SourceEvent> {
        self.rx.clone()
    }

    fn close(&self) -> WampaResult<()> {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if !state.watching {
            return Ok(());
        }

        let dirs = std::mem::take(&mut state.dirs);
        for dir in &dirs {
            if let Err(e) = state.watcher.unwatch(dir) {
                debug!(dir = %dir.display(), error = %e, "unwatch failed");
            }
        }
        self.targets
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
        state.watching = false;
        Ok(())
    }

    fn is_watching(&self) -> bool {
        self.state.lock().map(|s| s.watching).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, RemoveKind};
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn write_class_events() {
        assert!(is_write_class(&EventKind::Create(CreateKind::File)));
        assert!(is_write_class(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(!is_write_class(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_write_class(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::AccessTime
        ))));
    }

    #[test]
    fn dispatch_only_forwards_watched_paths() {
        let (tx, rx) = bounded(4);
        let mut map = TargetMap::new();
        map.insert(PathBuf::from("/w/a.md"), PathBuf::from("/w/a.md"));
        let targets = RwLock::new(map);

        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/w/a.md"))
            .add_path(PathBuf::from("/w/other.md"));
        dispatch(&event, &targets, &tx);

        assert_eq!(rx.try_recv().unwrap(), SourceEvent::local("/w/a.md"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dispatch_drops_when_channel_full() {
        let (tx, rx) = bounded(1);
        let mut map = TargetMap::new();
        map.insert(PathBuf::from("/w/a.md"), PathBuf::from("/w/a.md"));
        let targets = RwLock::new(map);
        let event =
            Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/w/a.md"));

        dispatch(&event, &targets, &tx);
        dispatch(&event, &targets, &tx);

        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn second_start_fails_with_already_watching() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.md");
        std::fs::write(&file, "A").unwrap();
        let w = NativeWatcher::new(8).unwrap();

        w.start(&[file.clone()]).unwrap();
        assert!(matches!(
            w.start(&[file]).unwrap_err(),
            WampaError::AlreadyWatching
        ));
        w.close().unwrap();
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.md");
        std::fs::write(&file, "A").unwrap();
        let w = NativeWatcher::new(8).unwrap();

        w.start(&[file]).unwrap();
        assert!(w.close().is_ok());
        assert!(w.close().is_ok());
        assert!(!w.is_watching());
    }

    #[test]
    fn missing_parent_directory_fails_start() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("no-such-dir").join("a.md");
        let w = NativeWatcher::new(8).unwrap();

        assert!(w.start(&[file]).is_err());
        assert!(!w.is_watching());
    }

    #[test]
    fn failed_start_releases_directories_already_watched() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.md");
        std::fs::write(&good, "A").unwrap();
        let bad = dir.path().join("no-such-dir").join("b.md");
        let w = NativeWatcher::new(8).unwrap();

        let err = w.start(&[good.clone(), bad]).unwrap_err();
        assert!(matches!(err, WampaError::Resolution { .. }));
        assert!(!w.is_watching());

        w.start(&[good]).unwrap();
        assert!(w.is_watching());
        w.close().unwrap();
    }

    #[test]
    fn reports_write_to_watched_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.md");
        std::fs::write(&file, "A").unwrap();
        let w = NativeWatcher::new(64).unwrap();
        w.start(&[file.clone()]).unwrap();

        std::thread::sleep(Duration::from_millis(100));
        std::fs::write(&file, "A2").unwrap();

        let event = w.events().recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.path, file.canonicalize().unwrap());
        assert!(!event.is_remote);
        w.close().unwrap();
    }
}
