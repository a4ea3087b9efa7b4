//! Feed body decoding.
//!
//! Turns a search response body into an ordered list of [`Article`]s. Failures
//! are isolated at two levels:
//! - a violated top-level shape (no `response.results` array) empties the batch
//! - a malformed entry is skipped and decoding continues with the next one
//!
//! [`decode`] is total and never fails. [`try_decode`] reports the structural
//! failure instead of swallowing it.

use crate::error::{DecodeError, EntryError};
use crate::types::{Article, NO_AUTHOR, NO_AUTHOR_NAME};
use serde_json::Value;
use tracing::{debug, warn};

/// Decode a response body, swallowing structural failures
///
/// `None`, empty and whitespace-only bodies yield an empty list. A body that is
/// not JSON or lacks `response.results` also yields an empty list (logged), so
/// callers cannot tell a malformed feed from an empty one through this function.
pub fn decode(body: Option<&str>) -> Vec<Article> {
    let Some(body) = body else {
        return Vec::new();
    };

    match try_decode(body) {
        Ok(articles) => articles,
        Err(e) => {
            warn!(error = %e, "Problem parsing the news feed JSON results");
            Vec::new()
        }
    }
}

/// Decode a response body, reporting structural failures
///
/// Blank input is not an error and yields an empty list.
///
/// # Errors
/// Returns [`DecodeError`] when the body is not JSON or lacks `response.results`.
pub fn try_decode(body: &str) -> Result<Vec<Article>, DecodeError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(body)?;
    let results = results_array(&root)?;

    let mut articles = Vec::with_capacity(results.len());
    for (index, entry) in results.iter().enumerate() {
        match decode_entry(entry) {
            Ok(article) => articles.push(article),
            Err(e) => debug!(index, error = %e, "Skipping malformed feed entry"),
        }
    }

    debug!(
        decoded = articles.len(),
        skipped = results.len() - articles.len(),
        "Decoded feed entries"
    );
    Ok(articles)
}

fn results_array(root: &Value) -> Result<&Vec<Value>, DecodeError> {
    let response = root
        .get("response")
        .ok_or_else(|| DecodeError::Structural("missing 'response' object".into()))?;
    if !response.is_object() {
        return Err(DecodeError::Structural("'response' is not an object".into()));
    }

    response
        .get("results")
        .ok_or_else(|| DecodeError::Structural("missing 'response.results' array".into()))?
        .as_array()
        .ok_or_else(|| DecodeError::Structural("'response.results' is not an array".into()))
}

/// Decode one element of `response.results`
///
/// # Errors
/// Returns [`EntryError`] if the entry is not an object or a required string field
/// is missing.
pub fn decode_entry(entry: &Value) -> Result<Article, EntryError> {
    if !entry.is_object() {
        return Err(EntryError::NotAnObject);
    }

    let section_id = required_str(entry, "sectionId")?;
    let section_name = required_str(entry, "sectionName")?;
    let title = required_str(entry, "webTitle")?;
    let publication_date = required_str(entry, "webPublicationDate")?;
    let url = required_str(entry, "webUrl")?;

    Ok(Article::new(
        section_id,
        section_name,
        title,
        publication_date,
        author_name(entry),
        url,
    ))
}

fn required_str<'a>(entry: &'a Value, field: &'static str) -> Result<&'a str, EntryError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .ok_or(EntryError::MissingField(field))
}

/// Author from the first contributor tag
fn author_name(entry: &Value) -> &str {
    match entry.get("tags").and_then(Value::as_array).and_then(|tags| tags.first()) {
        Some(first) => first
            .get("webTitle")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_AUTHOR),
        None => NO_AUTHOR_NAME,
    }
}

#[cfg(test)]
mod tests;
