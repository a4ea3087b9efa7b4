//! HTTP fetching of feed bodies
//!
//! [`FeedSource`] is the seam between the load controller and the network.
//! [`HttpFetcher`] is the production implementation: one GET per call, no
//! retries. The client enforces the connect timeout; the read timeout bounds the
//! wait for response headers and then every body chunk.

use crate::config::FetchConfig;
use crate::error::{Error, FetchError, NetworkCause, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

/// Something that can turn a feed URL into a response body
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the body behind `url`
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// reqwest-backed [`FeedSource`]
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    read_timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from HTTP settings
    ///
    /// # Errors
    /// Returns [`Error::Client`] if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            read_timeout: config.read_timeout,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let url = parse_feed_url(url)?;
        debug!(host = url.host_str().unwrap_or(""), path = url.path(), "Fetching feed");

        // Headers get `read_timeout` from the moment the request is issued, so a
        // connect slower than that fails here too. The response owns the
        // connection and releases it when dropped on any early return.
        let mut response = match timeout(self.read_timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(NetworkCause::Transport(e).into()),
            Err(_) => return Err(NetworkCause::ResponseTimeout(self.read_timeout).into()),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let mut body = Vec::new();
        loop {
            match timeout(self.read_timeout, response.chunk()).await {
                Ok(Ok(Some(chunk))) => body.extend_from_slice(&chunk),
                Ok(Ok(None)) => break,
                Ok(Err(e)) => return Err(NetworkCause::Transport(e).into()),
                Err(_) => return Err(NetworkCause::ReadTimeout(self.read_timeout).into()),
            }
        }

        debug!(bytes = body.len(), "Feed body received");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Parse and check a feed URL without touching the network
fn parse_feed_url(raw: &str) -> std::result::Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
