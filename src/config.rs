//! Configuration types for newsfeed

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Guardian content search endpoint
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search";

/// Query parameters injected into the feed URL
///
/// None of these values are interpreted by the pipeline; they only shape the
/// request URL (see [`crate::query::build_query_url`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Search endpoint (default: Guardian content search)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static API key sent as `api-key` (default: "test")
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Search term sent as `q` (default: "debate")
    #[serde(default = "default_search_term")]
    pub search_term: String,

    /// Result ordering sent as `order-by` (default: newest)
    #[serde(default)]
    pub order_by: OrderBy,

    /// Number of results per request sent as `page-size` (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            search_term: default_search_term(),
            order_by: OrderBy::default(),
            page_size: default_page_size(),
        }
    }
}

/// Result ordering accepted by the search endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    /// Best match first
    Relevance,
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
}

impl OrderBy {
    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Relevance => "relevance",
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(OrderBy::Relevance),
            "newest" => Ok(OrderBy::Newest),
            "oldest" => Ok(OrderBy::Oldest),
            other => Err(Error::config(
                "query.order_by",
                format!("unknown ordering '{other}' (expected relevance, newest or oldest)"),
            )),
        }
    }
}

/// HTTP fetch behavior
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Maximum time to establish a connection (default: 15000 ms)
    #[serde(default = "default_connect_timeout", with = "duration_ms_serde")]
    pub connect_timeout: Duration,

    /// Maximum wait for response headers and for each body chunk (default: 10000 ms)
    #[serde(default = "default_read_timeout", with = "duration_ms_serde")]
    pub read_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Retry behavior for failed fetches
///
/// The default makes a single attempt; raise `max_attempts` to retry transient
/// failures with exponential backoff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first one (default: 0)
    #[serde(default)]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 500 ms)
    #[serde(default = "default_initial_delay", with = "duration_ms_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 10000 ms)
    #[serde(default = "default_max_delay", with = "duration_ms_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Main configuration for the feed pipeline
///
/// Fields are grouped into sub-configs:
/// - [`query`](QueryConfig): what to ask the feed for
/// - [`fetch`](FetchConfig): how to talk HTTP
/// - [`retry`](RetryConfig): what to do when a fetch fails
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query parameters
    #[serde(default)]
    pub query: QueryConfig,

    /// HTTP settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Check that the configuration can produce a usable request
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.query.base_url.trim().is_empty() {
            return Err(Error::config("query.base_url", "must not be empty"));
        }
        if self.query.api_key.trim().is_empty() {
            return Err(Error::config("query.api_key", "must not be empty"));
        }
        if self.query.page_size == 0 {
            return Err(Error::config(
                "query.page_size",
                "must be greater than zero",
            ));
        }
        if self.fetch.connect_timeout.is_zero() {
            return Err(Error::config(
                "fetch.connect_timeout",
                "must be greater than zero",
            ));
        }
        if self.fetch.read_timeout.is_zero() {
            return Err(Error::config(
                "fetch.read_timeout",
                "must be greater than zero",
            ));
        }
        self.retry.validate()
    }
}

impl RetryConfig {
    /// Check that the policy describes a usable backoff
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the multiplier is not a finite number of
    /// at least 1.0, or `max_delay` is shorter than `initial_delay`.
    pub fn validate(&self) -> Result<()> {
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(Error::config(
                "retry.backoff_multiplier",
                "must be a finite number of at least 1.0",
            ));
        }
        if self.max_delay < self.initial_delay {
            return Err(Error::config(
                "retry.max_delay",
                "must not be shorter than retry.initial_delay",
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key() -> String {
    "test".to_string()
}

fn default_search_term() -> String {
    "debate".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_connect_timeout() -> Duration {
    Duration::from_millis(15_000)
}

fn default_read_timeout() -> Duration {
    Duration::from_millis(10_000)
}

fn default_user_agent() -> String {
    concat!("newsfeed/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (milliseconds)
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
