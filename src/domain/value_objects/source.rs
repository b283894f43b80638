//! Source value object
//!
//! A source is one configured input. Its identity is the literal string the
//! user supplied, so two equal strings in the input list are two sources.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

/// Where a source's content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A file on the local disk
    Local(PathBuf),
    /// An `http`/`https` URL
    Remote(Url),
}

/// One configured input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    raw: String,
    kind: SourceKind,
}

impl Source {
    /// Classify a raw input string.
    ///
    /// Anything that parses as a URL with an `http` or `https` scheme is remote;
    /// every other string (including `C:\foo` style paths) is a local path.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = match Url::parse(&raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SourceKind::Remote(url),
            _ => SourceKind::Local(PathBuf::from(&raw)),
        };
        Self { raw, kind }
    }

    /// Parse a whole ordered input list, keeping order and duplicates
    pub fn parse_all<S: AsRef<str>>(inputs: &[S]) -> Vec<Source> {
        inputs.iter().map(|s| Source::parse(s.as_ref())).collect()
    }

    /// The literal identity string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.kind, SourceKind::Remote(_))
    }

    pub fn local_path(&self) -> Option<&Path> {
        match &self.kind {
            SourceKind::Local(path) => Some(path),
            SourceKind::Remote(_) => None,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match &self.kind {
            SourceKind::Remote(url) => Some(url),
            SourceKind::Local(_) => None,
        }
    }

    /// Name used in the output delimiter line.
    ///
    /// Local paths use their final component; URLs use the last non-empty
    /// path segment, falling back to the host.
    pub fn display_name(&self) -> String {
        match &self.kind {
            SourceKind::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.raw.clone()),
            SourceKind::Remote(url) => url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                .map(str::to_string)
                .or_else(|| url.host_str().map(str::to_string))
                .unwrap_or_else(|| self.raw.clone()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Source {
    fn from(raw: &str) -> Self {
        Source::parse(raw)
    }
}
