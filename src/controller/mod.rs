//! Load controller: one authoritative feed load at a time.
//!
//! [`LoadController`] lives on the caller's (interactive) thread. `start` spawns
//! fetch + decode on a tokio runtime and returns immediately. Each operation gets
//! its own completion channel; the owning thread drains it with
//! [`LoadController::pump`] or [`LoadController::next_delivery`], which is where
//! the observer gets called. Starting again or resetting drops the previous
//! channel, so a superseded worker has nowhere to post; the operation token on
//! each completion is checked as well.
//!
//! ```text
//!             start(url)                 completion (token == current)
//!   Idle ────────────────▶ Loading ─────────────────────────────────▶ Delivered
//!    ▲                       │  ▲                                        │
//!    │ reset()               │  └──────────── start(url) ────────────────┤
//!    │                       └──── fetch failed ──▶ Failed ──────────────┘
//!    └──────────────────── reset() from any state
//! ```

mod observer;
mod pipeline;

pub use observer::FeedObserver;
pub use pipeline::load_articles;

use crate::config::{Config, RetryConfig};
use crate::error::{Error, Result};
use crate::fetcher::{FeedSource, HttpFetcher};
use crate::query::redact_api_key;
use crate::types::{FeedSnapshot, LoadState, OperationToken, empty_snapshot};
use pipeline::{Completion, spawn_load};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info};

/// Owns the current feed result and the lifecycle of background loads
pub struct LoadController {
    source: Arc<dyn FeedSource>,
    retry: RetryConfig,
    runtime: Handle,
    observer: Box<dyn FeedObserver>,

    state: LoadState,
    token: OperationToken,
    current: FeedSnapshot,
    last_error: Option<Error>,

    in_flight: Option<InFlight>,
}

/// The operation currently allowed to deliver
struct InFlight {
    url: String,
    completion_rx: UnboundedReceiver<Completion>,
}

impl LoadController {
    /// Create a controller that spawns loads on the current tokio runtime
    ///
    /// # Errors
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime; use
    /// [`LoadController::with_runtime`] from threads that do not run one.
    pub fn new(source: Arc<dyn FeedSource>, observer: impl FeedObserver + 'static) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::NoRuntime(e.to_string()))?;
        Ok(Self::with_runtime(source, observer, runtime))
    }

    /// Create a controller that spawns loads on `runtime`
    ///
    /// If `runtime` shuts down while a load is in flight, the worker is dropped
    /// without reporting; the controller notices on the next `pump` or
    /// `next_delivery` and fails the load with [`Error::Worker`].
    pub fn with_runtime(
        source: Arc<dyn FeedSource>,
        observer: impl FeedObserver + 'static,
        runtime: Handle,
    ) -> Self {
        Self {
            source,
            retry: RetryConfig::default(),
            runtime,
            observer: Box::new(observer),
            state: LoadState::Idle,
            token: OperationToken(0),
            current: empty_snapshot(),
            last_error: None,
            in_flight: None,
        }
    }

    /// Create a controller backed by an [`HttpFetcher`] built from `config`
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the HTTP client cannot
    /// be created, or no tokio runtime is running.
    pub fn from_config(config: &Config, observer: impl FeedObserver + 'static) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Self::new(Arc::new(fetcher), observer)?.with_retry(config.retry.clone())
    }

    /// Set the retry policy applied to each fetch
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the policy fails [`RetryConfig::validate`].
    pub fn with_retry(mut self, retry: RetryConfig) -> Result<Self> {
        retry.validate()?;
        self.retry = retry;
        Ok(self)
    }

    /// Start loading `url`, superseding any load in flight
    ///
    /// Never blocks. The result of any earlier operation is discarded when it
    /// arrives. Returns the token identifying the new operation.
    pub fn start(&mut self, url: impl Into<String>) -> OperationToken {
        let url = url.into();
        self.token = self.token.next();
        if self.state.is_loading() {
            debug!(token = %self.token, "Superseding in-flight load");
        }
        self.state = LoadState::Loading;

        debug!(token = %self.token, url = %loggable(&url), "Starting feed load");
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        spawn_load(
            &self.runtime,
            self.source.clone(),
            self.retry.clone(),
            self.token,
            url.clone(),
            completion_tx,
        );
        self.in_flight = Some(InFlight { url, completion_rx });
        self.token
    }

    /// Drop the current result, return to `Idle` and deliver an empty snapshot
    ///
    /// Any load in flight becomes stale and will not be delivered.
    pub fn reset(&mut self) {
        self.token = self.token.next();
        self.state = LoadState::Idle;
        self.last_error = None;
        self.current = empty_snapshot();
        self.in_flight = None;

        debug!(token = %self.token, "Load controller reset");
        self.observer.on_result(self.current.clone());
    }

    /// Apply the current operation's completion if it has already arrived
    ///
    /// Meant to be called from the owning thread's event loop. Never waits.
    /// Returns the number of deliveries made (0 or 1).
    pub fn pump(&mut self) -> usize {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return 0;
        };
        let delivered = match in_flight.completion_rx.try_recv() {
            Ok(completion) => self.apply(completion),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => self.abandon(),
        };
        usize::from(delivered.is_some())
    }

    /// Wait for the current load to deliver
    ///
    /// Returns `None` immediately when nothing is loading.
    pub async fn next_delivery(&mut self) -> Option<FeedSnapshot> {
        if !self.state.is_loading() {
            return None;
        }
        let in_flight = self.in_flight.as_mut()?;
        match in_flight.completion_rx.recv().await {
            Some(completion) => self.apply(completion),
            None => self.abandon(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Token of the authoritative operation
    pub fn token(&self) -> OperationToken {
        self.token
    }

    /// Last delivered snapshot (empty when idle, failed or never loaded)
    pub fn current(&self) -> FeedSnapshot {
        self.current.clone()
    }

    /// Cause of the latest failed load, if the latest load failed
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    fn apply(&mut self, completion: Completion) -> Option<FeedSnapshot> {
        let Completion { token, url, result } = completion;

        if token != self.token || !self.state.is_loading() {
            debug!(
                token = %token,
                current = %self.token,
                "Dropping result of superseded load"
            );
            return None;
        }

        let snapshot = match result {
            Ok(articles) => {
                info!(
                    token = %token,
                    count = articles.len(),
                    "Feed loaded"
                );
                self.state = LoadState::Delivered;
                self.last_error = None;
                FeedSnapshot::from(articles)
            }
            Err(e) => {
                error!(
                    token = %token,
                    url = %loggable(&url),
                    error = %e,
                    "Problem loading the news feed"
                );
                self.state = LoadState::Failed;
                self.last_error = Some(e);
                empty_snapshot()
            }
        };

        self.in_flight = None;
        self.current = snapshot.clone();
        self.observer.on_result(snapshot.clone());
        Some(snapshot)
    }

    /// Fail the current load whose worker went away without reporting
    fn abandon(&mut self) -> Option<FeedSnapshot> {
        let url = self.in_flight.as_ref()?.url.clone();
        self.apply(Completion {
            token: self.token,
            url,
            result: Err(Error::Worker(
                "load task dropped before reporting; its runtime may have shut down".into(),
            )),
        })
    }
}

impl std::fmt::Debug for LoadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadController")
            .field("state", &self.state)
            .field("token", &self.token)
            .field("current_len", &self.current.len())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// URL form safe for logs (API key masked)
fn loggable(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => redact_api_key(&parsed).to_string(),
        Err(_) => url.to_string(),
    }
}
