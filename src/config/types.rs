//! Configuration type definitions

use std::path::Path;

use serde::Deserialize;

use crate::error::{WampaError, WampaResult};
use crate::infrastructure::remote::DEFAULT_MAX_SIZE;
use crate::infrastructure::watcher::WatcherMode;

use super::loader::{self, ConfigOverrides};
use super::ConfigWarning;

/// Watch behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchSettings {
    #[serde(default)]
    pub mode: WatcherMode,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_remote_size")]
    pub max_remote_size: u64,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Keep a failing source's last good content in the output
    #[serde(default)]
    pub retain_on_error: bool,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            mode: WatcherMode::default(),
            poll_interval_ms: default_poll_interval_ms(),
            max_remote_size: default_max_remote_size(),
            channel_capacity: default_channel_capacity(),
            retain_on_error: false,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_remote_size() -> u64 {
    DEFAULT_MAX_SIZE
}

fn default_channel_capacity() -> usize {
    16
}

/// Main configuration structure
///
/// `input_files` and `output_file` must be present in a config file;
/// either may then be replaced from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Config {
    pub input_files: Vec<String>,

    pub output_file: String,

    #[serde(default)]
    pub watch: WatchSettings,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> WampaResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WampaResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (WAMPA_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Apply command-line overrides
    pub fn with_overrides(self, overrides: &ConfigOverrides) -> Self {
        loader::apply_overrides(self, overrides)
    }

    /// Check the merged configuration
    pub fn validate(&self) -> WampaResult<()> {
        if self.input_files.is_empty() {
            return Err(WampaError::InvalidConfig(
                "input_files must not be empty".to_string(),
            ));
        }

        if let Some(i) = self.input_files.iter().position(|f| f.is_empty()) {
            return Err(WampaError::InvalidConfig(format!(
                "input_files[{}] must not be empty",
                i
            )));
        }

        if self.output_file.is_empty() {
            return Err(WampaError::InvalidConfig(
                "output_file must not be empty".to_string(),
            ));
        }

        if self.watch.poll_interval_ms == 0 {
            return Err(WampaError::InvalidConfig(
                "watch.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.watch.channel_capacity == 0 {
            return Err(WampaError::InvalidConfig(
                "watch.channel_capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
