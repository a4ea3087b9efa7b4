//! Observer side of the load controller.

use crate::types::FeedSnapshot;

/// Receives the terminal result of each load
///
/// Called on the thread that owns the [`LoadController`](super::LoadController),
/// exactly once per authoritative `start` and once per `reset`. A failed load and
/// an empty feed both arrive as an empty snapshot.
pub trait FeedObserver {
    /// Handle a delivered result
    fn on_result(&mut self, articles: FeedSnapshot);
}

impl<F> FeedObserver for F
where
    F: FnMut(FeedSnapshot),
{
    fn on_result(&mut self, articles: FeedSnapshot) {
        self(articles)
    }
}
