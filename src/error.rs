//! Error types for Wampa
//!
//! Library code returns `WampaResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Wampa operations
pub type WampaResult<T> = Result<T, WampaError>;

/// Main error type for Wampa operations
#[derive(Error, Debug)]
pub enum WampaError {
    /// `start` was called on a watcher that is already running
    #[error("watcher is already watching")]
    AlreadyWatching,

    /// A watched path could not be resolved or inspected
    #[error("failed to resolve '{}': {source}", path.display())]
    Resolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote body is larger than the configured ceiling
    #[error("{}", size_exceeded_message(*size, *max))]
    SizeExceeded { size: Option<u64>, max: u64 },

    /// Remote server answered with a non-success status
    #[error("unexpected status code {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Fetch was handed no response at all
    #[error("nil HTTP response for {url}")]
    NilResponse { url: String },

    /// Source string looked remote but is not a usable URL
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The streaming sink rejected a chunk
    #[error("processing chunk: {0}")]
    ChunkSink(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Native notification backend failure
    #[error("watcher error: {0}")]
    Watcher(#[from] notify::Error),

    /// Configuration file could not be parsed
    #[error("invalid config in {}: {message}", file.display())]
    ConfigParse { file: PathBuf, message: String },

    /// Configuration is structurally valid but semantically wrong
    #[error("{0}")]
    InvalidConfig(String),
}

fn size_exceeded_message(size: Option<u64>, max: u64) -> String {
    match size {
        Some(size) => format!("file size {} exceeds maximum allowed size {}", size, max),
        None => format!("file size exceeds maximum allowed size {}", max),
    }
}
