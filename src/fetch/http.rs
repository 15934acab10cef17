//! Remote document retrieval over HTTP.

use crate::error::FetchError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use std::time::Duration;
use tracing::debug;

/// Source of remote document text.
///
/// The fetch layer talks to remotes only through this trait, so tests can
/// substitute an in-memory source.
pub trait RemoteSource {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// [`RemoteSource`] backed by a blocking `reqwest` client
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build a client. Without `timeout`, requests may block indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        // Ask servers and proxies for a fresh copy; caching is ours to do.
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl RemoteSource for HttpSource {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "HTTP GET");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        Ok(String::from_utf8(body.to_vec())?)
    }
}
