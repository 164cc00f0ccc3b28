//! Related-ticker fetch flow.
//!
//! The search response is loosely typed, so it is walked as a
//! [`serde_json::Value`] rather than deserialized into structs: only
//! `news[].relatedTickers` matters and every other field is ignored.

use std::sync::Arc;

use reqwest::Url;
use serde_json::{Map, Value};

use crate::domain::{RelatedTickers, SearchTerm};
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

/// Build the search URL for `search_term`. The ticker is not encoded.
pub fn related_url(base: &str, search_term: &SearchTerm) -> String {
    format!("{base}?q={search_term}")
}

/// Extract every `relatedTickers` list from a search response body, in
/// document order.
///
/// The body must be an object whose `news` field is an array of objects;
/// one non-object element rejects the whole array. Elements without a
/// `relatedTickers` array made only of strings are skipped.
pub fn parse_related_tickers(body: &[u8]) -> Result<Vec<RelatedTickers>, FetchError> {
    let document: Value = serde_json::from_slice(body)?;

    let news = document
        .as_object()
        .ok_or_else(|| FetchError::unexpected_shape("top-level value is not an object"))?
        .get("news")
        .ok_or_else(|| FetchError::unexpected_shape("missing 'news' field"))?
        .as_array()
        .ok_or_else(|| FetchError::unexpected_shape("'news' is not an array"))?;

    let items = news
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or_else(|| FetchError::unexpected_shape("'news' contains a non-object element"))
        })
        .collect::<Result<Vec<&Map<String, Value>>, FetchError>>()?;

    Ok(items
        .into_iter()
        .filter_map(|item| item.get("relatedTickers"))
        .filter_map(string_list)
        .map(RelatedTickers::new)
        .collect())
}

/// Display text of the match that ends up visible.
///
/// Every match overwrites the previous one, so this is the last match, not
/// the first. That is probably not what the upstream layout intends, but it
/// is the observable behavior and is kept.
pub fn latest_display_text(matches: &[RelatedTickers]) -> Option<String> {
    matches.last().map(RelatedTickers::display_text)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|ticker| ticker.as_str().map(str::to_owned))
        .collect()
}

/// Queries the finance search endpoint for tickers related to a search term.
#[derive(Clone)]
pub struct RelatedTickerFetcher {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
    timeout_ms: Option<u64>,
}

impl RelatedTickerFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn url_for(&self, search_term: &SearchTerm) -> String {
        related_url(&self.endpoint, search_term)
    }

    /// Fetch and extract all matches. The status code is not checked: an
    /// error page fails on the body shape instead.
    pub async fn fetch(&self, search_term: &SearchTerm) -> Result<Vec<RelatedTickers>, FetchError> {
        let url = self.url_for(search_term);
        Url::parse(&url).map_err(|error| FetchError::malformed_url(&url, error))?;

        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;

        parse_related_tickers(&response.body)
    }
}
