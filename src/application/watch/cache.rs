//! Cache of fetched remote sources

use std::collections::HashMap;

/// Last successfully fetched body per remote source, keyed by the
/// configured URL string.
///
/// Owned by a single `WatchUseCase`; entries are replaced only by a
/// successful fetch.
#[derive(Debug, Default, Clone)]
pub struct RemoteCache {
    entries: HashMap<String, Vec<u8>>,
}

impl RemoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&[u8]> {
        self.entries.get(url).map(Vec::as_slice)
    }

    pub fn insert(&mut self, url: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.insert(url.into(), content.into());
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
