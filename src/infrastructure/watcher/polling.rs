//! Polling watcher
//!
//! One background thread re-snapshots every watched path per tick, diffs the
//! fresh table against the stored one and emits an event per non-removed
//! change.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender, TrySendError};
use tracing::{debug, error, warn};

use crate::domain::entities::{SnapshotTable, SourceEvent};
use crate::domain::ports::{resolve_all, snapshot_all, snapshot_available, SourceFileSystem};
use crate::domain::ports::SourceWatcher;
use crate::domain::services::{diff, events_from_changes};
use crate::error::{WampaError, WampaResult};
use crate::infrastructure::fs::LocalFs;

/// Default polling period
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of one detection cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub emitted: usize,
    pub dropped: usize,
}

/// State owned by the polling thread
struct PollLoop {
    fs: Arc<dyn SourceFileSystem>,
    paths: Vec<PathBuf>,
    table: SnapshotTable,
    events: Sender<SourceEvent>,
}

impl PollLoop {
    fn poll_once(&mut self) -> PollOutcome {
        let (current, errors) = snapshot_available(self.fs.as_ref(), &self.paths);
        for e in errors {
            warn!(error = %e, "dropping source from this poll cycle");
        }

        let changes = diff(&current, &self.table);
        let events = events_from_changes(&changes);

        // The table for the next diff is the one captured before emitting.
        self.table = current;

        let mut outcome = PollOutcome::default();
        for event in events {
            match self.events.try_send(event) {
                Ok(()) => outcome.emitted += 1,
                Err(TrySendError::Full(event)) => {
                    warn!(path = %event.path.display(), "event channel is full, dropping event");
                    outcome.dropped += 1;
                }
                Err(TrySendError::Disconnected(event)) => {
                    debug!(path = %event.path.display(), "event receiver gone");
                    outcome.dropped += 1;
                }
            }
        }
        outcome
    }

    fn run(mut self, period: Duration, stop: Receiver<()>) {
        let ticker = tick(period);
        loop {
            select! {
                recv(stop) -> _ => break,
                recv(ticker) -> _ => {
                    let outcome = self.poll_once();
                    if outcome.dropped > 0 {
                        warn!(dropped = outcome.dropped, "poll cycle could not deliver every event");
                    }
                }
            }
        }
        debug!("polling loop stopped");
    }
}

struct PollHandle {
    // Dropping the sender disconnects the channel and ends the loop.
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

/// Watcher that detects changes by periodic snapshots
pub struct PollingWatcher {
    fs: Arc<dyn SourceFileSystem>,
    period: Duration,
    tx: Sender<SourceEvent>,
    rx: Receiver<SourceEvent>,
    handle: Mutex<Option<PollHandle>>,
}

impl PollingWatcher {
    /// Polling watcher over the local disk
    pub fn new(period: Duration, capacity: usize) -> Self {
        Self::with_fs(Arc::new(LocalFs::new()), period, capacity)
    }

    /// Polling watcher over any file system implementation
    pub fn with_fs(fs: Arc<dyn SourceFileSystem>, period: Duration, capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self {
            fs,
            period,
            tx,
            rx,
            handle: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl SourceWatcher for PollingWatcher {
    fn start(&self, paths: &[PathBuf]) -> WampaResult<()> {
        let mut handle = self.handle.lock().unwrap_or_else(|p| p.into_inner());
        if handle.is_some() {
            return Err(WampaError::AlreadyWatching);
        }

        let resolved = resolve_all(self.fs.as_ref(), paths)?;
        let table = snapshot_all(self.fs.as_ref(), &resolved)?;

        let state = PollLoop {
            fs: Arc::clone(&self.fs),
            paths: resolved,
            table,
            events: self.tx.clone(),
        };
        let period = self.period;
        let (stop, stop_rx) = bounded::<()>(0);
        let thread = thread::Builder::new()
            .name("wampa-poll".to_string())
            .spawn(move || state.run(period, stop_rx))?;

        *handle = Some(PollHandle { stop, thread });
        Ok(())
    }

    fn events(&self) -> Receiver<SourceEvent> {
        self.rx.clone()
    }

    fn close(&self) -> WampaResult<()> {
        let taken = self
            .handle
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take();

        if let Some(PollHandle { stop, thread }) = taken {
            drop(stop);
            if thread.join().is_err() {
                error!("polling thread panicked");
            }
        }
        Ok(())
    }

    fn is_watching(&self) -> bool {
        self.handle
            .lock()
            .map(|h| h.is_some())
            .unwrap_or(false)
    }
}

impl Drop for PollingWatcher {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
