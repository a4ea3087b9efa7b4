//! # newsfeed
//!
//! Asynchronous fetch-and-decode pipeline for JSON news feeds shaped like the
//! Guardian content search API.
//!
//! ## Design Philosophy
//!
//! newsfeed is designed to be:
//! - **Non-blocking** - loads run on tokio tasks, the caller never waits
//! - **Failure-isolating** - a malformed entry is skipped, never the whole batch
//! - **Thread-confined delivery** - results reach the observer on its own thread
//! - **Library-first** - no UI, the display layer is a consumer
//!
//! ## Quick Start
//!
//! ```no_run
//! use newsfeed::{Config, LoadController, FeedSnapshot, build_query_url};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let url = build_query_url(&config.query)?;
//!
//!     let mut controller = LoadController::from_config(&config, |articles: FeedSnapshot| {
//!         for article in articles.iter() {
//!             println!("{} ({})", article.title(), article.author_name());
//!         }
//!     })?;
//!
//!     controller.start(url.as_str());
//!     controller.next_delivery().await;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Load lifecycle and observer delivery
pub mod controller;
/// Feed body decoding
pub mod decoder;
/// Error types
pub mod error;
/// HTTP fetching
pub mod fetcher;
/// Request URL construction
pub mod query;
/// Retry logic with exponential backoff
pub mod retry;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, FetchConfig, OrderBy, QueryConfig, RetryConfig};
pub use controller::{FeedObserver, LoadController, load_articles};
pub use decoder::{decode, try_decode};
pub use error::{DecodeError, EntryError, Error, FetchError, NetworkCause, Result};
pub use fetcher::{FeedSource, HttpFetcher};
pub use query::build_query_url;
pub use types::{Article, FeedSnapshot, LoadState, OperationToken};
