//! Error types for Biblio Core

use thiserror::Error;

/// Result type alias using BiblioError
pub type Result<T> = std::result::Result<T, BiblioError>;

/// Top-level error type for all Biblio operations
///
/// Upstream failures never appear here: adapters absorb them and report
/// "no data" instead. The cache is the only collaborator whose failure
/// reaches the caller.
#[derive(Debug, Error)]
pub enum BiblioError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl BiblioError {
    /// Whether the caller may reasonably retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, BiblioError::Cache(e) if e.is_retryable())
    }
}

/// Errors that occur while reading from or writing to the cache store
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt cache entry for {isbn}: {source}")]
    Corrupt {
        isbn: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

impl CacheError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, CacheError::Unavailable(_))
    }
}

/// Errors raised while talking to an upstream bibliographic API
///
/// These stay inside the adapters; they are logged and then degraded to
/// "no data".
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status_code}: {message}")]
    Status { status_code: u16, message: String },
}

/// Errors that occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}
