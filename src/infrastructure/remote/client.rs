//! Blocking HTTP client for remote sources

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use url::Url;

use super::fetch::{read_streaming, read_whole, FetchError, RemoteBody, RemoteMetadata};
use crate::domain::ports::{HttpResponse, RemoteFetch};
use crate::error::{WampaError, WampaResult};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("wampa/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpResponse for Response {
    fn status(&self) -> u16 {
        Response::status(self).as_u16()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    fn content_length(&self) -> Option<u64> {
        Response::content_length(self)
    }

    fn body(&mut self) -> &mut dyn Read {
        self
    }
}

/// Parse and check a remote source URL.
pub fn parse_url(raw: &str) -> WampaResult<Url> {
    let url = Url::parse(raw).map_err(|e| WampaError::InvalidUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(WampaError::InvalidUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Fetches remote sources with a size ceiling
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
    max_size: u64,
    headers: Vec<(String, String)>,
}

impl RemoteFetcher {
    pub fn new(max_size: u64) -> WampaResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            max_size,
            headers: Vec::new(),
        })
    }

    /// Extra header sent with every request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Build a GET for `raw`, rejecting anything that is not an http(s) URL.
    pub fn build_request(&self, raw: &str) -> WampaResult<RequestBuilder> {
        let url = parse_url(raw)?;
        let mut request = self.client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        Ok(request)
    }

    fn send(&self, url: &str) -> Result<Response, FetchError> {
        let request = self
            .build_request(url)
            .map_err(|e| FetchError::new(RemoteMetadata::for_url(url), e))?;
        request
            .send()
            .map_err(|e| FetchError::new(RemoteMetadata::for_url(url), WampaError::Http(e)))
    }

    /// Fetch the whole body of `url`.
    pub fn fetch_whole(&self, url: &str) -> Result<RemoteBody, FetchError> {
        let mut response = self.send(url)?;
        read_whole(Some(&mut response), url, self.max_size)
    }

    /// Fetch `url` and hand the body to `on_chunk` piece by piece.
    pub fn fetch_streaming<F, E>(
        &self,
        url: &str,
        chunk_size: usize,
        on_chunk: F,
    ) -> Result<RemoteMetadata, FetchError>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
        E: fmt::Display,
    {
        let mut response = self.send(url)?;
        read_streaming(Some(&mut response), url, self.max_size, chunk_size, on_chunk)
    }
}

impl RemoteFetch for RemoteFetcher {
    fn fetch(&self, url: &str) -> WampaResult<Vec<u8>> {
        match self.fetch_whole(url) {
            Ok(body) => {
                tracing::debug!(
                    url,
                    bytes = body.bytes.len(),
                    etag = body.metadata.etag.as_deref(),
                    last_modified = body.metadata.last_modified.as_deref(),
                    "fetched remote source"
                );
                Ok(body.bytes)
            }
            Err(err) => {
                tracing::debug!(
                    url,
                    declared = ?err.metadata.size,
                    error = %err,
                    "remote fetch failed"
                );
                Err(err.into_inner())
            }
        }
    }
}
