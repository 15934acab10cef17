//! Error types for the drytoml transclusion engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while retrieving a remote reference
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Response is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Fetch cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist cache entry: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Errors raised by the resolution engine.
///
/// None of these are recovered from inside the engine: a single broken
/// transclusion invalidates the whole resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid reference: {0}")]
    Reference(String),

    #[error("Referenced file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Cannot merge {incoming} into {current}")]
    MergeType {
        current: &'static str,
        incoming: &'static str,
    },

    #[error("Path not found: {path}")]
    MissingPath { path: String },

    #[error("Unsupported extend value at {path}: {kind}")]
    UnsupportedExtend { path: String, kind: &'static str },

    #[error("Failed to parse {reference}: {source}")]
    Parse {
        reference: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Reference cycle detected: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced at the CLI boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("Aborted")]
    Aborted,

    #[error("Nothing cleared from {}", .0.display())]
    NothingCleared(PathBuf),

    #[error("Tool failed: {0}")]
    ToolFailed(String),

    #[error("{tool} exited with status {code}")]
    ToolExit { tool: String, code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::Serialize(err.to_string())
    }
}
