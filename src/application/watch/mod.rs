//! Watch Use Case
//!
//! Keeps one output document in sync with an ordered list of sources.
//! It orchestrates:
//! - Change detection (polling or native, via `SourceWatcher`)
//! - Initial generation, fetching remote sources once
//! - Regeneration from local reads and the remote cache
//! - Atomic output writes
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Main orchestrator
//! - `RemoteCache` - Last fetched content of each remote source
//! - `WatchEvent` - Events emitted during watch operation
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(Source::parse_all(&inputs), "out.md");
//! let mut use_case = WatchUseCase::new(options)?;
//! use_case.start(running, |event| { ... })?;
//! ```

mod cache;
mod event;
mod use_case;


pub use cache::RemoteCache;
pub use event::{WatchEvent, WatchOptions, DEFAULT_CHANNEL_CAPACITY};
pub use use_case::{PassReport, WatchUseCase};
