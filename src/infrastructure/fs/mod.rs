//! File System Implementations
//!
//! Concrete implementations of the SourceFileSystem port.

mod local;

pub use local::LocalFs;
#[cfg(unix)]
pub use local::OUTPUT_MODE;
