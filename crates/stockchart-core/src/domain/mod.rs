//! # Domain Models
//!
//! Values that flow between the fetchers, the display context and the host.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SearchTerm`] | Ticker as typed by the user, unvalidated |
//! | [`Preset`] | One of the five time-range buttons |
//! | [`TimeRangeSelection`] | `(range, interval)` sent to the chart endpoint |
//! | [`ChartImage`] | Decoded-checked chart bytes plus the request they answer |
//! | [`RelatedTickers`] | Ticker list from one news item |

mod chart_image;
mod preset;
mod related_tickers;
mod search_term;

pub use chart_image::ChartImage;
pub use preset::{Preset, TimeRangeSelection};
pub use related_tickers::{RelatedTickers, RELATED_TICKERS_HEADING};
pub use search_term::SearchTerm;
