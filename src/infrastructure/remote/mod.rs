//! Remote sources over HTTP

mod client;
mod fetch;

pub use client::{parse_url, RemoteFetcher, USER_AGENT};
pub use fetch::{
    read_streaming, read_whole, FetchError, RemoteBody, RemoteMetadata, DEFAULT_CHUNK_SIZE,
    DEFAULT_MAX_SIZE, KB, MB,
};

#[cfg(test)]
pub(crate) use fetch::testing;
