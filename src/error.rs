//! Error types for newsfeed
//!
//! The taxonomy mirrors the pipeline stages:
//! - [`FetchError`] crosses the fetcher boundary as an explicit value
//! - [`DecodeError`] describes a violated feed contract (top-level shape)
//! - [`EntryError`] describes one skipped feed entry and never escalates
//!
//! [`Error`] is the crate-level error used by configuration, URL building and
//! client construction.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for newsfeed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for newsfeed
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "query.api_key")
        key: Option<String>,
    },

    /// Fetching the feed failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The feed body violated the expected top-level structure
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// No tokio runtime is available to run background loads
    #[error("no tokio runtime available: {0}")]
    NoRuntime(String),

    /// A background load task panicked or was cancelled
    #[error("load task failed: {0}")]
    Worker(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

/// Failure of a single HTTP fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed, or is not http(s); no connection was attempted
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL string
        url: String,
        /// Why the URL was rejected
        reason: String,
    },

    /// Connection, timeout or read failure
    #[error("network error: {0}")]
    Network(#[from] NetworkCause),

    /// Server answered with a status other than 200
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
}

/// Underlying cause of a [`FetchError::Network`]
#[derive(Debug, Error)]
pub enum NetworkCause {
    /// Transport error reported by the HTTP client (DNS, connect, TLS, reset)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// No response headers arrived in time
    #[error("timed out after {0:?} waiting for response headers")]
    ResponseTimeout(Duration),

    /// The body stalled between chunks for longer than the read timeout
    #[error("timed out after {0:?} reading response body")]
    ReadTimeout(Duration),
}

/// Top-level feed structure violation
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is valid but lacks `response` / `results`
    #[error("unexpected feed structure: {0}")]
    Structural(String),
}

/// Reason a single feed entry was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The entry is not a JSON object
    #[error("entry is not an object")]
    NotAnObject,

    /// A required string field is missing or not a string
    #[error("missing or non-string field '{0}'")]
    MissingField(&'static str),
}
