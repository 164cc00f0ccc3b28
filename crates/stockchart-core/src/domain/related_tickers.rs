/// Heading placed above the joined ticker list.
pub const RELATED_TICKERS_HEADING: &str = "Related Tickers:\n";

/// Tickers listed on one news item of the search response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedTickers(Vec<String>);

impl RelatedTickers {
    pub fn new(tickers: Vec<String>) -> Self {
        Self(tickers)
    }

    /// Text written into the related-tickers display slot.
    pub fn display_text(&self) -> String {
        format!("{RELATED_TICKERS_HEADING}{}", self.0.join(", "))
    }
}
