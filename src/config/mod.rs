//! Configuration module for Wampa
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (WAMPA_*)
//! 3. Config file (`wampa.json` or `-c <path>`)
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{load_layered, parse_with_warnings, ConfigOverrides, DEFAULT_CONFIG_FILE};
pub use types::{Config, WatchSettings};
