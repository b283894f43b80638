//! Wampa - keep one document in sync with many sources
//!
//! Wampa watches an ordered list of local files and remote URLs and
//! regenerates a single concatenated output file whenever a local source
//! changes. Remote sources are fetched once and served from a cache.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{WatchEvent, WatchOptions, WatchUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::services::{diff, format};
pub use domain::value_objects::Source;
pub use error::{WampaError, WampaResult};
pub use infrastructure::watcher::{build_watcher, WatcherMode};
