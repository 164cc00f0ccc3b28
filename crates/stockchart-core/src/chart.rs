//! Chart fetch flow: build the chart URL, GET it, decode-check the image.

use std::sync::Arc;

use reqwest::Url;

use crate::config::CHART_STYLE_PARAMS;
use crate::domain::{ChartImage, SearchTerm, TimeRangeSelection};
use crate::error::FetchError;
use crate::http_client::{HttpClient, HttpRequest};

/// Build the chart URL for `search_term` and `selection`.
///
/// The ticker, range and interval are substituted as-is; nothing is
/// percent-encoded.
pub fn chart_url(base: &str, search_term: &SearchTerm, selection: &TimeRangeSelection) -> String {
    format!(
        "{base}?TickerSymbol={}&TimeRange={}&Interval={}&{CHART_STYLE_PARAMS}",
        search_term, selection.range, selection.interval
    )
}

/// Retrieves rendered chart images. Cheap to clone; clones share the
/// transport.
#[derive(Clone)]
pub struct ChartFetcher {
    http_client: Arc<dyn HttpClient>,
    endpoint: String,
    timeout_ms: Option<u64>,
}

impl ChartFetcher {
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

    pub fn url_for(&self, search_term: &SearchTerm, selection: &TimeRangeSelection) -> String {
        chart_url(&self.endpoint, search_term, selection)
    }

    /// Fetch one chart. No caching and no dedup: every call goes upstream.
    pub async fn fetch(
        &self,
        search_term: &SearchTerm,
        selection: &TimeRangeSelection,
    ) -> Result<ChartImage, FetchError> {
        let url = self.url_for(search_term, selection);
        Url::parse(&url).map_err(|error| FetchError::malformed_url(&url, error))?;

        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        let chart = ChartImage::decode(response.body, search_term.clone(), selection.clone())?;
        Ok(chart)
    }
}
