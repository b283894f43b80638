//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Keeps the output document in sync with its sources

pub mod watch;

pub use watch::{PassReport, RemoteCache, WatchEvent, WatchOptions, WatchUseCase};
