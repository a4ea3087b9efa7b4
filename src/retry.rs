//! Caller-side retry around a [`FeedSource`]
//!
//! The fetcher makes exactly one request per call. [`fetch_with_retry`] applies a
//! [`RetryConfig`] on top: transient failures are fetched again after an
//! exponentially growing pause, anything else is returned at once. With the
//! default policy (`max_attempts = 0`) it is a single plain fetch.

use crate::config::RetryConfig;
use crate::error::{FetchError, NetworkCause};
use crate::fetcher::FeedSource;
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

impl FetchError {
    /// Whether the same request could succeed if sent again
    ///
    /// Timeouts, refused or dropped connections, 408, 429 and the gateway-style
    /// 5xx codes are transient. A malformed URL or a rejected request never is.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::InvalidUrl { .. } => false,
            FetchError::Network(NetworkCause::ResponseTimeout(_))
            | FetchError::Network(NetworkCause::ReadTimeout(_)) => true,
            FetchError::Network(NetworkCause::Transport(e)) => {
                e.is_timeout() || e.is_connect() || e.is_body()
            }
            FetchError::HttpStatus(code) => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
        }
    }
}

impl RetryConfig {
    /// Pause before retry number `retry` (1-based), without jitter
    ///
    /// Grows by `backoff_multiplier` per retry and saturates at `max_delay`,
    /// including when the product does not fit in a [`Duration`].
    pub fn backoff(&self, retry: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        Duration::try_from_secs_f64(secs)
            .map_or(self.max_delay, |pause| pause.min(self.max_delay))
    }

    fn pause_before(&self, retry: u32) -> Duration {
        let pause = self.backoff(retry);
        if self.jitter { spread(pause) } else { pause }
    }
}

/// Fetch `url`, retrying transient failures as `policy` allows
///
/// # Errors
/// Returns the last [`FetchError`] once it is permanent or the retry budget is
/// spent.
pub async fn fetch_with_retry(
    source: &dyn FeedSource,
    url: &str,
    policy: &RetryConfig,
) -> Result<String, FetchError> {
    let mut retries = 0;
    loop {
        let error = match source.fetch(url).await {
            Ok(body) => {
                if retries > 0 {
                    info!(retries, "Feed fetched after retrying");
                }
                return Ok(body);
            }
            Err(e) => e,
        };

        if !error.is_transient() || retries >= policy.max_attempts {
            if retries > 0 {
                warn!(error = %error, retries, "Giving up on feed fetch");
            }
            return Err(error);
        }

        retries += 1;
        let pause = policy.pause_before(retries);
        warn!(
            error = %error,
            retry = retries,
            max_attempts = policy.max_attempts,
            pause_ms = u64::try_from(pause.as_millis()).unwrap_or(u64::MAX),
            "Transient feed fetch failure, retrying"
        );
        tokio::time::sleep(pause).await;
    }
}

/// Random pause between half of `pause` and all of it
fn spread(pause: Duration) -> Duration {
    pause.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
}
