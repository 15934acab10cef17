//! Fetch layer: raw document text for a reference.
//!
//! Local paths are read from disk. URLs go through the on-disk cache first
//! and hit the network only on a miss.

pub mod cache;
pub mod http;

pub use cache::{CacheEntryInfo, CacheService};
pub use http::{HttpSource, RemoteSource};

use crate::error::{FetchError, ResolveError};
use crate::reference::Reference;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Retrieves document text for references
pub struct Fetcher {
    cache: CacheService,
    remote: Box<dyn RemoteSource>,
}

impl Fetcher {
    pub fn new(cache: CacheService, remote: Box<dyn RemoteSource>) -> Self {
        Self { cache, remote }
    }

    /// Fetcher using HTTP for remotes
    pub fn http(cache: CacheService, timeout: Option<Duration>) -> Result<Self, FetchError> {
        Ok(Self::new(cache, Box::new(HttpSource::new(timeout)?)))
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }

    pub fn fetch(&self, reference: &Reference) -> Result<String, ResolveError> {
        match reference {
            Reference::Path(path) => read_file(path),
            Reference::Url(url) => self.fetch_url(url),
        }
    }

    fn fetch_url(&self, url: &str) -> Result<String, ResolveError> {
        if let Some(text) = self.cache.get(url)? {
            debug!(url, "Cache hit");
            return Ok(text);
        }

        debug!(url, "Cache miss");
        let text = self
            .remote
            .get(url)
            .map_err(|source: FetchError| ResolveError::Fetch {
                url: url.to_string(),
                source,
            })?;
        self.cache.put(url, &text)?;
        Ok(text)
    }
}

fn read_file(path: &Path) -> Result<String, ResolveError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ResolveError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(ResolveError::Io(e)),
    }
}
