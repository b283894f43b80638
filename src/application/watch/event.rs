//! Watch event types and options

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::domain::value_objects::Source;
use crate::infrastructure::remote::DEFAULT_MAX_SIZE;
use crate::infrastructure::watcher::{WatcherMode, DEFAULT_POLL_INTERVAL};

/// Default capacity of the watcher event channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Ordered input sources
    pub sources: Vec<Source>,
    /// Output file path
    pub output: PathBuf,
    /// Change detection backend
    pub mode: WatcherMode,
    /// Polling period (poll mode only)
    pub poll_interval: Duration,
    /// Ceiling for remote bodies
    pub max_remote_size: u64,
    /// Watcher event channel capacity
    pub channel_capacity: usize,
    /// Keep a failing source's last good content instead of dropping it
    pub retain_on_error: bool,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    /// Create new watch options with minimal required fields
    pub fn new(sources: Vec<Source>, output: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            output: output.into(),
            mode: WatcherMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_remote_size: DEFAULT_MAX_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            retain_on_error: false,
            json: false,
        }
    }

    /// Build options from a validated config
    pub fn from_config(config: &Config) -> Self {
        Self {
            sources: Source::parse_all(&config.input_files),
            output: PathBuf::from(&config.output_file),
            mode: config.watch.mode,
            poll_interval: Duration::from_millis(config.watch.poll_interval_ms),
            max_remote_size: config.watch.max_remote_size,
            channel_capacity: config.watch.channel_capacity,
            retain_on_error: config.watch.retain_on_error,
            json: false,
        }
    }

    pub fn with_mode(mut self, mode: WatcherMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_remote_size(mut self, max: u64) -> Self {
        self.max_remote_size = max;
        self
    }

    pub fn with_retain_on_error(mut self, retain: bool) -> Self {
        self.retain_on_error = retain;
        self
    }

    /// Set JSON output mode
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Local paths to put under watch, in source order
    pub fn local_paths(&self) -> Vec<PathBuf> {
        self.sources
            .iter()
            .filter_map(|s| s.local_path().map(|p| p.to_path_buf()))
            .collect()
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        sources: Vec<String>,
        output: String,
    },
    /// A watched source changed
    SourceChanged { path: String },
    /// A source could not be read or fetched this pass
    SourceError { source: String, message: String },
    /// Output file rewritten
    OutputUpdated { path: String, sources: usize },
    /// Error occurred
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
