//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system (snapshots, atomic output writes)
//! - `remote/` - HTTP fetching with a size ceiling
//! - `watcher/` - Polling and native change watchers

pub mod fs;
pub mod remote;
pub mod watcher;

pub use fs::LocalFs;
pub use remote::RemoteFetcher;
pub use watcher::{build_watcher, NativeWatcher, PollingWatcher, WatcherMode};
