//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod http;
pub mod watcher;

pub use file_system::{resolve_all, snapshot_all, snapshot_available, SourceFileSystem};
pub use http::{HttpResponse, RemoteFetch};
pub use watcher::SourceWatcher;
