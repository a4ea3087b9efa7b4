//! Core types for newsfeed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Author placeholder when the first tag carries no usable title
pub const NO_AUTHOR: &str = "No Author";

/// Author placeholder when the entry has no tags at all
pub const NO_AUTHOR_NAME: &str = "No author name";

/// One decoded feed entry
///
/// Fields are private and only exposed through accessors, so an `Article` is
/// never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    section_id: String,
    section_name: String,
    title: String,
    publication_date: String,
    author_name: String,
    url: String,
}

impl Article {
    /// Create a new article from already-extracted values
    pub fn new(
        section_id: impl Into<String>,
        section_name: impl Into<String>,
        title: impl Into<String>,
        publication_date: impl Into<String>,
        author_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            section_name: section_name.into(),
            title: title.into(),
            publication_date: publication_date.into(),
            author_name: author_name.into(),
            url: url.into(),
        }
    }

    /// Feed category identifier (e.g. "politics")
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Human-readable category name
    pub fn section_name(&self) -> &str {
        &self.section_name
    }

    /// Headline
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication timestamp exactly as the source provided it
    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    /// Author name, or one of [`NO_AUTHOR`] / [`NO_AUTHOR_NAME`]
    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Canonical link to the full article
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Publication date parsed as RFC 3339, if it is one
    ///
    /// The stored string is never altered; this is a display convenience.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.publication_date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Immutable, cheaply clonable sequence of articles in source order
pub type FeedSnapshot = Arc<[Article]>;

/// An empty snapshot
pub fn empty_snapshot() -> FeedSnapshot {
    Arc::from(Vec::<Article>::new())
}

/// Identifier of one `start`/`reset` of a load controller
///
/// Tokens increase monotonically per controller; only the latest one is
/// authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationToken(pub u64);

impl OperationToken {
    /// Get the inner value
    pub fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for OperationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load controller state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing loaded, nothing in flight
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The latest load completed and its articles were delivered
    Delivered,
    /// The latest load failed; an empty result was delivered
    Failed,
}

impl LoadState {
    /// Whether a completion is still expected
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
