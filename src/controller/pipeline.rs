//! Fetch-then-decode, as run on a worker task.

use crate::config::RetryConfig;
use crate::decoder::decode;
use crate::error::{Error, FetchError};
use crate::fetcher::FeedSource;
use crate::retry::fetch_with_retry;
use crate::types::{Article, OperationToken};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Result of one background load, tagged with the operation that started it
#[derive(Debug)]
pub(crate) struct Completion {
    pub(crate) token: OperationToken,
    pub(crate) url: String,
    pub(crate) result: Result<Vec<Article>, Error>,
}

/// Fetch `url` from `source` and decode the body
///
/// Decoding is total, so the only failures are fetch failures (after the retry
/// budget in `retry` is spent).
pub async fn load_articles(
    source: &dyn FeedSource,
    url: &str,
    retry: &RetryConfig,
) -> Result<Vec<Article>, FetchError> {
    let body = fetch_with_retry(source, url, retry).await?;
    Ok(decode(Some(&body)))
}

/// Run [`load_articles`] on `runtime` and send the tagged result to `tx`
///
/// The load runs in its own task so that a panic inside it still produces a
/// completion (as [`Error::Worker`]) instead of leaving the caller waiting.
pub(crate) fn spawn_load(
    runtime: &Handle,
    source: Arc<dyn FeedSource>,
    retry: RetryConfig,
    token: OperationToken,
    url: String,
    tx: UnboundedSender<Completion>,
) {
    let worker_runtime = runtime.clone();
    runtime.spawn(async move {
        let load_url = url.clone();
        let load = worker_runtime.spawn(async move {
            load_articles(source.as_ref(), &load_url, &retry).await
        });

        let result = match load.await {
            Ok(Ok(articles)) => Ok(articles),
            Ok(Err(e)) => Err(Error::Fetch(e)),
            Err(join_error) => Err(Error::Worker(join_error.to_string())),
        };

        // The controller may be gone or have moved on to another operation
        tx.send(Completion { token, url, result }).ok();
    });
}
