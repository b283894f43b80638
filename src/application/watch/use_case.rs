//! Watch Use Case implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use crate::domain::ports::{RemoteFetch, SourceFileSystem, SourceWatcher};
use crate::domain::services::format;
use crate::domain::value_objects::{Source, SourceKind};
use crate::error::{WampaError, WampaResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::remote::RemoteFetcher;
use crate::infrastructure::watcher::build_watcher;

use super::cache::RemoteCache;
use super::event::{WatchEvent, WatchOptions};

/// How long the loop waits on the event channel before rechecking the
/// running flag
const EVENT_WAIT: Duration = Duration::from_millis(50);

/// Outcome of one regeneration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Sources that made it into the output, in order
    pub included: Vec<String>,
    /// Sources that failed this pass, with the error message
    pub failed: Vec<(String, String)>,
    /// Whether the output file was written
    pub written: bool,
}

/// Watch Use Case
///
/// Owns the watcher, the remote cache and the output file for one watch
/// session. Nothing here is global, so several sessions can run side by
/// side.
pub struct WatchUseCase {
    options: WatchOptions,
    fs: Arc<dyn SourceFileSystem>,
    fetcher: Arc<dyn RemoteFetch>,
    watcher: Box<dyn SourceWatcher>,
    cache: RemoteCache,
    last_good: HashMap<String, Vec<u8>>,
}

impl WatchUseCase {
    /// Create a use case with the local file system, the HTTP fetcher and
    /// the watcher backend selected in `options`.
    ///
    /// Fails if the watcher backend cannot be constructed.
    pub fn new(options: WatchOptions) -> WampaResult<Self> {
        let watcher = build_watcher(
            options.mode,
            options.poll_interval,
            options.channel_capacity,
        )?;
        let fetcher = RemoteFetcher::new(options.max_remote_size)?;
        Ok(Self::with_parts(
            options,
            Arc::new(LocalFs::new()),
            Arc::new(fetcher),
            watcher,
        ))
    }

    /// Create a use case from explicit collaborators
    pub fn with_parts(
        options: WatchOptions,
        fs: Arc<dyn SourceFileSystem>,
        fetcher: Arc<dyn RemoteFetch>,
        watcher: Box<dyn SourceWatcher>,
    ) -> Self {
        Self {
            options,
            fs,
            fetcher,
            watcher,
            cache: RemoteCache::new(),
            last_good: HashMap::new(),
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn cache(&self) -> &RemoteCache {
        &self.cache
    }

    /// Start watching (blocking)
    ///
    /// Starts the watcher, writes the initial output, then regenerates on
    /// every change until `running` is cleared. Only startup failures are
    /// returned as errors.
    pub fn start<F>(&mut self, running: Arc<AtomicBool>, on_event: F) -> WampaResult<()>
    where
        F: Fn(WatchEvent),
    {
        let local_paths = self.options.local_paths();
        if !local_paths.is_empty() {
            self.watcher.start(&local_paths)?;
        }

        let sources: Vec<String> = self
            .options
            .sources
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        tracing::info!(?sources, output = %self.options.output.display(), "watching sources");
        on_event(WatchEvent::WatchStarted {
            sources,
            output: self.options.output.display().to_string(),
        });

        self.generate_initial(&on_event);
        self.run_loop(&running, &on_event);

        if let Err(e) = self.watcher.close() {
            tracing::warn!(error = %e, "failed to close watcher");
        }
        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    fn run_loop(&mut self, running: &AtomicBool, on_event: &impl Fn(WatchEvent)) {
        let events = self.watcher.events();

        while running.load(Ordering::SeqCst) {
            let first = match events.recv_timeout(EVENT_WAIT) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("watcher event channel closed");
                    break;
                }
            };

            // Changes queued while the previous pass was writing are folded
            // into this pass.
            let mut batch = vec![first];
            batch.extend(events.try_iter());
            for event in &batch {
                tracing::info!(path = %event.path.display(), "source changed");
                on_event(WatchEvent::SourceChanged {
                    path: event.path.display().to_string(),
                });
            }

            self.regenerate(on_event);
        }
    }

    /// First pass: read local sources and fetch remote ones into the cache.
    ///
    /// Stops collecting at the first failing source but still writes
    /// whatever was gathered before it.
    pub fn generate_initial(&mut self, on_event: &impl Fn(WatchEvent)) -> PassReport {
        let mut report = PassReport::default();
        let mut contents = HashMap::new();
        let sources = self.options.sources.clone();

        for source in &sources {
            let result = match source.kind() {
                SourceKind::Remote(_) => self.fetcher.fetch(source.as_str()).map(|body| {
                    self.cache.insert(source.as_str(), body.clone());
                    body
                }),
                SourceKind::Local(path) => self.fs.read(path),
            };

            match result {
                Ok(body) => {
                    if !source.is_remote() {
                        self.last_good.insert(source.as_str().to_string(), body.clone());
                    }
                    contents.insert(source.as_str().to_string(), body);
                    report.included.push(source.as_str().to_string());
                }
                Err(e) => {
                    report_source_error(source, &e, on_event);
                    report.failed.push((source.as_str().to_string(), e.to_string()));
                    break;
                }
            }
        }

        report.written = self.write_output(&sources, &contents, report.included.len(), on_event);
        report
    }

    /// Steady-state pass: re-read local sources, serve remote ones from
    /// the cache, and rewrite the output.
    ///
    /// A failing local source is left out of the output, or keeps its last
    /// good content when `retain_on_error` is set.
    pub fn regenerate(&mut self, on_event: &impl Fn(WatchEvent)) -> PassReport {
        let mut report = PassReport::default();
        let mut contents = HashMap::new();
        let sources = self.options.sources.clone();

        for source in &sources {
            let key = source.as_str();
            let body = match source.kind() {
                SourceKind::Remote(_) => self.cache.get(key).map(<[u8]>::to_vec),
                SourceKind::Local(path) => match self.fs.read(path) {
                    Ok(body) => {
                        self.last_good.insert(key.to_string(), body.clone());
                        Some(body)
                    }
                    Err(e) => {
                        report_source_error(source, &e, on_event);
                        report.failed.push((key.to_string(), e.to_string()));
                        if self.options.retain_on_error {
                            self.last_good.get(key).cloned()
                        } else {
                            None
                        }
                    }
                },
            };

            if let Some(body) = body {
                contents.insert(key.to_string(), body);
                report.included.push(key.to_string());
            }
        }

        report.written = self.write_output(&sources, &contents, report.included.len(), on_event);
        report
    }

    /// Re-fetch one remote source, replacing its cached content on success.
    ///
    /// The cache is left untouched when the fetch fails.
    pub fn refresh_remote(&mut self, url: &str) -> WampaResult<()> {
        let configured = self
            .options
            .sources
            .iter()
            .any(|s| s.is_remote() && s.as_str() == url);
        if !configured {
            return Err(WampaError::InvalidUrl {
                url: url.to_string(),
                message: "not a configured remote source".to_string(),
            });
        }

        let body = self.fetcher.fetch(url)?;
        self.cache.insert(url, body);
        tracing::debug!(url, "remote source refreshed");
        Ok(())
    }

    fn write_output(
        &self,
        sources: &[Source],
        contents: &HashMap<String, Vec<u8>>,
        included: usize,
        on_event: &impl Fn(WatchEvent),
    ) -> bool {
        let output = format(sources, contents);
        let path = &self.options.output;

        match self.fs.write_atomic(path, &output) {
            Ok(()) => {
                tracing::info!(path = %path.display(), sources = included, "output file updated");
                on_event(WatchEvent::OutputUpdated {
                    path: path.display().to_string(),
                    sources: included,
                });
                true
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "failed to write output file");
                on_event(WatchEvent::Error {
                    message: format!("failed to write {}: {}", path.display(), e),
                });
                false
            }
        }
    }
}

fn report_source_error(source: &Source, err: &WampaError, on_event: &impl Fn(WatchEvent)) {
    tracing::debug!(source = %source, error = %err, "failed to read source");
    on_event(WatchEvent::SourceError {
        source: source.as_str().to_string(),
        message: err.to_string(),
    });
}
