//! # Stockchart Core
//!
//! Fetch flows and session state for a single-screen ticker chart: type a
//! ticker, see its candlestick chart, flip between preset time ranges, read
//! the related tickers, send the chart into a conversation.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Chart URL builder and [`ChartFetcher`] |
//! | [`related`] | Related-ticker extraction and [`RelatedTickerFetcher`] |
//! | [`display`] | Display context that serializes every display write |
//! | [`session`] | [`Session`]: search term, events, in-flight fetches |
//! | [`send`] | Sending the displayed chart as a message attachment |
//! | [`config`] | Embedded endpoints and session settings |
//! | [`domain`] | Search term, presets, chart image, related tickers |
//! | [`error`] | Fetch and validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  events   ┌─────────────────┐
//! │  Host (CLI/UI)  │──────────▶│     Session     │
//! └────────▲────────┘           └───┬─────────┬───┘
//!          │ watch                  │ spawn   │ spawn
//!          │                        ▼         ▼
//! ┌────────┴────────┐  updates ┌─────────┐ ┌──────────────┐
//! │ Display Context │◀─────────│  Chart  │ │   Related    │
//! │ (single writer) │◀─────────│ Fetcher │ │ TickerFetcher│
//! └─────────────────┘          └────┬────┘ └──────┬───────┘
//!                                   └──────┬──────┘
//!                                          ▼
//!                                 ┌─────────────────┐
//!                                 │  HTTP Client    │
//!                                 └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! The fetchers return [`FetchError`]. The session applies a best-effort
//! policy: a failed fetch is logged and the display keeps what it had.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockchart_core::{DirectoryOutbox, ReqwestHttpClient, Session, SessionConfig, SessionEvent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut session = Session::new(
//!         SessionConfig::default(),
//!         Arc::new(ReqwestHttpClient::new()),
//!         Arc::new(DirectoryOutbox::new("outbox")),
//!     );
//!     session.handle(SessionEvent::Search(String::from("MSFT")));
//!     session.settle().await;
//!     println!("{:?}", session.snapshot().related_text);
//! }
//! ```

pub mod chart;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod related;
pub mod send;
pub mod session;

pub use chart::{chart_url, ChartFetcher};
pub use config::{Endpoints, SessionConfig, CHART_ENDPOINT, CHART_STYLE_PARAMS, SEARCH_ENDPOINT};
pub use display::{DisplayHandle, DisplayState, DisplayUpdate};
pub use domain::{
    ChartImage, Preset, RelatedTickers, SearchTerm, TimeRangeSelection, RELATED_TICKERS_HEADING,
};
pub use error::{FetchError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use related::{latest_display_text, parse_related_tickers, related_url, RelatedTickerFetcher};
pub use send::{ChartMessage, DirectoryOutbox, MessageComposer, SendChartAction};
pub use session::{PresentationStyle, Session, SessionEvent};
