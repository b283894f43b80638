//! Bounded remote body reading
//!
//! Works on any `HttpResponse` so the size ceiling can be exercised without
//! a network. The running-total check applies whether or not the server
//! declared a length, and whether or not it told the truth.

use std::fmt;
use std::io::ErrorKind;

use crate::domain::ports::HttpResponse;
use crate::error::WampaError;

pub const KB: u64 = 1000;
pub const MB: u64 = 1000 * KB;

/// Default ceiling for a remote body
pub const DEFAULT_MAX_SIZE: u64 = 100 * MB;

/// Default chunk size handed to streaming sinks
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// What the response headers said about a remote source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMetadata {
    pub url: String,
    pub last_modified: Option<String>,
    pub etag: Option<String>,
    pub content_type: Option<String>,
    /// Declared content length
    pub size: Option<u64>,
}

impl RemoteMetadata {
    /// Metadata for a fetch that never got a response
    pub fn for_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn from_response(url: &str, resp: &dyn HttpResponse) -> Self {
        Self {
            url: url.to_string(),
            last_modified: resp.header("Last-Modified"),
            etag: resp.header("ETag"),
            content_type: resp.header("Content-Type"),
            size: resp.content_length(),
        }
    }
}

/// A failed fetch, keeping whatever metadata the headers provided
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct FetchError {
    pub metadata: RemoteMetadata,
    #[source]
    pub source: WampaError,
}

impl FetchError {
    pub fn new(metadata: RemoteMetadata, source: WampaError) -> Self {
        Self { metadata, source }
    }

    pub fn into_inner(self) -> WampaError {
        self.source
    }
}

/// Whole body plus its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBody {
    pub bytes: Vec<u8>,
    pub metadata: RemoteMetadata,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn nil_response(url: &str) -> FetchError {
    FetchError::new(
        RemoteMetadata::for_url(url),
        WampaError::NilResponse {
            url: url.to_string(),
        },
    )
}

/// Check status and declared length, returning the header metadata.
fn preflight(
    resp: &dyn HttpResponse,
    url: &str,
    max_size: u64,
) -> Result<RemoteMetadata, FetchError> {
    let metadata = RemoteMetadata::from_response(url, resp);

    if !is_success(resp.status()) {
        let source = WampaError::UnexpectedStatus {
            status: resp.status(),
            url: url.to_string(),
        };
        return Err(FetchError::new(metadata, source));
    }

    if let Some(declared) = metadata.size {
        if declared > max_size {
            let source = WampaError::SizeExceeded {
                size: Some(declared),
                max: max_size,
            };
            return Err(FetchError::new(metadata, source));
        }
    }

    Ok(metadata)
}

/// Read the body in `chunk_size` pieces and hand each to `on_chunk`.
///
/// Fails with `SizeExceeded` as soon as the running total passes
/// `max_size`; the offending chunk is never delivered. A sink error aborts
/// the read and is returned as `ChunkSink`.
pub fn read_streaming<F, E>(
    resp: Option<&mut dyn HttpResponse>,
    url: &str,
    max_size: u64,
    chunk_size: usize,
    mut on_chunk: F,
) -> Result<RemoteMetadata, FetchError>
where
    F: FnMut(&[u8]) -> Result<(), E>,
    E: fmt::Display,
{
    let Some(resp) = resp else {
        return Err(nil_response(url));
    };
    let metadata = preflight(&*resp, url, max_size)?;

    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;
    let body = resp.body();

    loop {
        let n = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FetchError::new(metadata, WampaError::Io(e))),
        };

        total += n as u64;
        if total > max_size {
            let source = WampaError::SizeExceeded {
                size: None,
                max: max_size,
            };
            return Err(FetchError::new(metadata, source));
        }

        if let Err(e) = on_chunk(&buffer[..n]) {
            return Err(FetchError::new(metadata, WampaError::ChunkSink(e.to_string())));
        }
    }

    Ok(metadata)
}

/// Read the whole body, bounded by `max_size`.
pub fn read_whole(
    resp: Option<&mut dyn HttpResponse>,
    url: &str,
    max_size: u64,
) -> Result<RemoteBody, FetchError> {
    let capacity = resp
        .as_deref()
        .and_then(|r| r.content_length())
        .unwrap_or(0)
        .min(max_size)
        .min(DEFAULT_CHUNK_SIZE as u64 * 32) as usize;
    let mut bytes = Vec::with_capacity(capacity);

    let metadata = read_streaming(resp, url, max_size, DEFAULT_CHUNK_SIZE, |chunk| {
        bytes.extend_from_slice(chunk);
        Ok::<(), std::convert::Infallible>(())
    })?;

    Ok(RemoteBody { bytes, metadata })
}
