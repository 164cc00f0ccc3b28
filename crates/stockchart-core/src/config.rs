//! Embedded endpoints and session settings.

use crate::domain::SearchTerm;

/// Chart-rendering page that answers with a candlestick image.
pub const CHART_ENDPOINT: &str = "https://www.stockscores.com/chart.asp";

/// Finance search endpoint whose `news[].relatedTickers` feed the related list.
pub const SEARCH_ENDPOINT: &str = "https://query1.finance.yahoo.com/v1/finance/search";

/// Styling parameters appended to every chart request: candlesticks,
/// 600x480 pixels, no overlays or indicators.
pub const CHART_STYLE_PARAMS: &str = "Volume=None&ChartType=CandleStick&Stockscores=None\
&ChartWidth=600&ChartHeight=480&LogScale=None&Band=None&avgType1=None&movAvg1=\
&avgType2=None&movAvg2=&Indicator1=None&Indicator2=None&Indicator3=None&Indicator4=None\
&endDate=&CompareWith=&entryPrice=&stopLossPrice=&candles=redgreen";

/// Base URLs of the two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub chart: String,
    pub search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chart: String::from(CHART_ENDPOINT),
            search: String::from(SEARCH_ENDPOINT),
        }
    }
}

/// Settings for one [`Session`](crate::session::Session).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub endpoints: Endpoints,
    /// Per-request timeout; `None` defers to the transport default.
    pub timeout_ms: Option<u64>,
    pub initial_ticker: SearchTerm,
}

impl SessionConfig {
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_initial_ticker(mut self, ticker: impl Into<SearchTerm>) -> Self {
        self.initial_ticker = ticker.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_params_join_without_gaps() {
        assert!(!CHART_STYLE_PARAMS.contains(' '));
        assert!(CHART_STYLE_PARAMS.contains("&ChartWidth=600&ChartHeight=480&"));
        assert!(CHART_STYLE_PARAMS.contains("&movAvg1=&avgType2=None&"));
        assert!(CHART_STYLE_PARAMS.ends_with("&candles=redgreen"));
    }

    #[test]
    fn default_config_uses_embedded_hosts() {
        let config = SessionConfig::default();
        assert_eq!(config.endpoints.chart, CHART_ENDPOINT);
        assert_eq!(config.endpoints.search, SEARCH_ENDPOINT);
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.initial_ticker.as_str(), "AAPL");
    }
}
