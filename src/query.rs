//! Feed request URL construction

use crate::config::QueryConfig;
use crate::error::{Error, Result};
use url::Url;

/// Tag set requested from the search endpoint so that entries carry author tags
pub const SHOW_TAGS: &str = "contributor";

/// Build the search URL for a query configuration
///
/// Produces `{base_url}?api-key=..&q=..&page-size=..&show-tags=contributor&order-by=..`,
/// appending to any query string already present on `base_url`. Values are
/// form-encoded.
///
/// # Errors
/// Returns [`Error::Config`] if `base_url` is not an absolute URL.
pub fn build_query_url(query: &QueryConfig) -> Result<Url> {
    let mut url = Url::parse(&query.base_url)
        .map_err(|e| Error::config("query.base_url", format!("invalid base URL: {e}")))?;

    if url.cannot_be_a_base() {
        return Err(Error::config(
            "query.base_url",
            "base URL must be hierarchical (e.g. https://host/path)",
        ));
    }

    url.query_pairs_mut()
        .append_pair("api-key", &query.api_key)
        .append_pair("q", &query.search_term)
        .append_pair("page-size", &query.page_size.to_string())
        .append_pair("show-tags", SHOW_TAGS)
        .append_pair("order-by", query.order_by.as_str());

    tracing::debug!(url = %redact_api_key(&url), "Built feed query URL");
    Ok(url)
}

/// Copy of `url` with the `api-key` value masked, for logging
pub fn redact_api_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api-key" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    if pairs.is_empty() {
        return redacted;
    }

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
