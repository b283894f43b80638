//! Watcher Implementations
//!
//! Concrete implementations of the SourceWatcher port, selected at
//! construction time.

mod native;
mod polling;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::ports::SourceWatcher;
use crate::error::{WampaError, WampaResult};

pub use native::NativeWatcher;
pub use polling::{PollOutcome, PollingWatcher, DEFAULT_POLL_INTERVAL};

/// Which change-detection backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatcherMode {
    #[default]
    Poll,
    Native,
}

impl fmt::Display for WatcherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatcherMode::Poll => f.write_str("poll"),
            WatcherMode::Native => f.write_str("native"),
        }
    }
}

impl FromStr for WatcherMode {
    type Err = WampaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poll" | "polling" => Ok(WatcherMode::Poll),
            "native" | "notify" => Ok(WatcherMode::Native),
            other => Err(WampaError::InvalidConfig(format!(
                "unknown watch mode '{}' (expected 'poll' or 'native')",
                other
            ))),
        }
    }
}

/// Construct the watcher for `mode`.
///
/// `poll_interval` is ignored by the native backend. Construction failure
/// is fatal for the caller.
pub fn build_watcher(
    mode: WatcherMode,
    poll_interval: Duration,
    capacity: usize,
) -> WampaResult<Box<dyn SourceWatcher>> {
    Ok(match mode {
        WatcherMode::Poll => Box::new(PollingWatcher::new(poll_interval, capacity)),
        WatcherMode::Native => Box::new(NativeWatcher::new(capacity)?),
    })
}
