//! SourceWatcher port - change detection for local sources
//!
//! Implementations:
//! - `PollingWatcher` - periodic re-snapshot + diff
//! - `NativeWatcher` - host filesystem notifications via `notify`
//!
//! Callers hold a `Box<dyn SourceWatcher>` and never learn which backend
//! is active.

use std::path::PathBuf;

use crossbeam_channel::Receiver;

use crate::domain::entities::SourceEvent;
use crate::error::WampaResult;

pub trait SourceWatcher: Send + Sync {
    /// Put every path under watch, or none of them.
    ///
    /// Fails with `AlreadyWatching` if the watcher is running, and with
    /// `Resolution` if any path cannot be resolved.
    fn start(&self, paths: &[PathBuf]) -> WampaResult<()>;

    /// The stream of change triggers. Cloning the receiver is cheap.
    fn events(&self) -> Receiver<SourceEvent>;

    /// Stop watching. Calling it again is a no-op.
    fn close(&self) -> WampaResult<()>;

    /// Whether `start` succeeded and `close` has not been called since
    fn is_watching(&self) -> bool;
}
