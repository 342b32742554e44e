//! Feed transport: fetch a resource body from the local filesystem or over HTTP(S).

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Why a snapshot could not be loaded. Both kinds end the session's load attempt.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    /// Resource missing, non-success status, or transport failure (including timeout).
    #[error("data not found: {0}")]
    NotFound(String),
    /// Body is not a JSON array of products.
    #[error("invalid feed data: {0}")]
    Parse(String),
}

/// Single GET-style read of a named resource.
pub trait FeedSource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError>;
}

pub fn is_http(resource: &str) -> bool {
    resource.starts_with("http://") || resource.starts_with("https://")
}

/// Reads resources as paths relative to the working directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FeedSource for FsSource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        let path = Path::new(resource);
        if !path.is_file() {
            return Err(LoadError::NotFound(format!("{} (no such file)", resource)));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| LoadError::NotFound(format!("{} ({})", resource, e)))?;
        decode(resource, bytes)
    }
}

/// The resource was read; a body that is not UTF-8 is malformed data, not a missing resource.
fn decode(resource: &str, bytes: Vec<u8>) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|e| LoadError::Parse(format!("{} ({})", resource, e)))
}

/// Blocking HTTP GET with a whole-request timeout.
#[derive(Debug, Clone)]
pub struct HttpSource {
    timeout: Duration,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl FeedSource for HttpSource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadError::NotFound(format!("{} ({})", resource, e)))?;
        let resp = client
            .get(resource)
            .send()
            .map_err(|e| LoadError::NotFound(format!("{} ({})", resource, e)))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::NotFound(format!("{} (HTTP {})", resource, status)));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| LoadError::NotFound(format!("{} ({})", resource, e)))?;
        decode(resource, bytes.to_vec())
    }
}

/// Dispatches on the resource id: `http(s)://` goes over the network, anything else is a file.
#[derive(Debug, Clone)]
pub struct AutoSource {
    http: HttpSource,
}

impl AutoSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: HttpSource::new(timeout),
        }
    }
}

impl FeedSource for AutoSource {
    fn fetch(&self, resource: &str) -> Result<String, LoadError> {
        if is_http(resource) {
            tracing::debug!(resource, "fetching over http");
            self.http.fetch(resource)
        } else {
            tracing::debug!(resource, "reading local file");
            FsSource.fetch(resource)
        }
    }
}
