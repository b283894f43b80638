//! HttpResponse port - the parts of an HTTP response the fetcher reads
//!
//! Implemented for `reqwest::blocking::Response`; tests provide canned
//! responses with lying or missing content lengths.

use std::io::Read;

use crate::error::WampaResult;

pub trait HttpResponse {
    /// Numeric status code
    fn status(&self) -> u16;

    /// First value of a header, if present and valid UTF-8
    fn header(&self, name: &str) -> Option<String>;

    /// Declared body length, if the server sent one
    fn content_length(&self) -> Option<u64>;

    /// Body reader
    fn body(&mut self) -> &mut dyn Read;
}

/// Fetches a remote source's body.
///
/// The orchestrator only needs the raw bytes; size limits and metadata are
/// the implementor's concern.
pub trait RemoteFetch: Send + Sync {
    fn fetch(&self, url: &str) -> WampaResult<Vec<u8>>;
}
