//! Session: owns the search term and turns user events into fetches.
//!
//! Each fetch runs as its own tokio task and posts its result to the
//! [`DisplayHandle`]. Nothing is deduplicated or cancelled automatically, so
//! overlapping fetches race and the last one to complete is what stays on
//! screen. [`Session::cancel`] is available for hosts that want to drop
//! superseded work.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::chart::ChartFetcher;
use crate::config::SessionConfig;
use crate::display::{DisplayHandle, DisplayState};
use crate::domain::{Preset, SearchTerm, TimeRangeSelection};
use crate::http_client::HttpClient;
use crate::related::RelatedTickerFetcher;
use crate::send::{ChartMessage, MessageComposer, SendChartAction};

/// Presentation the host is asked to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationStyle {
    Compact,
    Expanded,
}

/// User-level events a host forwards to the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Initial load with the configured ticker.
    Start,
    /// User is about to type a ticker.
    BeginSearch,
    /// Search submitted.
    Search(String),
    /// Time-range button tapped.
    Preset(Preset),
    /// Chart tapped: send it to the conversation.
    SendChart,
    /// A chart message arrived in the conversation.
    ReceivedMessage(ChartMessage),
}

pub struct Session {
    search_term: SearchTerm,
    chart_fetcher: ChartFetcher,
    related_fetcher: RelatedTickerFetcher,
    send_action: SendChartAction,
    display: DisplayHandle,
    selected_session: Option<Uuid>,
    presentation_request: Option<PresentationStyle>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Session {
    /// Build a session and spawn its display context. Must be called inside a
    /// tokio runtime.
    pub fn new(
        config: SessionConfig,
        http_client: Arc<dyn HttpClient>,
        composer: Arc<dyn MessageComposer>,
    ) -> Self {
        let SessionConfig {
            endpoints,
            timeout_ms,
            initial_ticker,
        } = config;

        Self {
            search_term: initial_ticker,
            chart_fetcher: ChartFetcher::new(http_client.clone(), endpoints.chart)
                .with_timeout_ms(timeout_ms),
            related_fetcher: RelatedTickerFetcher::new(http_client, endpoints.search)
                .with_timeout_ms(timeout_ms),
            send_action: SendChartAction::new(composer),
            display: DisplayHandle::spawn(),
            selected_session: None,
            presentation_request: None,
            in_flight: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Start => self.start(),
            SessionEvent::BeginSearch => self.begin_search(),
            SessionEvent::Search(text) => self.search(text),
            SessionEvent::Preset(preset) => self.select_preset(preset),
            SessionEvent::SendChart => {
                self.send_chart();
            }
            SessionEvent::ReceivedMessage(message) => self.receive_message(message),
        }
    }

    pub fn start(&mut self) {
        self.refresh(TimeRangeSelection::default());
    }

    /// Typing needs the expanded presentation.
    pub fn begin_search(&mut self) {
        self.presentation_request = Some(PresentationStyle::Expanded);
    }

    /// Replace the search term and reload with the default range.
    pub fn search(&mut self, text: impl Into<String>) {
        self.search_term = SearchTerm::new(text);
        self.refresh(TimeRangeSelection::default());
    }

    pub fn select_preset(&mut self, preset: Preset) {
        self.refresh(preset.selection());
    }

    /// Send the displayed chart, then ask the host to collapse.
    pub fn send_chart(&mut self) -> bool {
        let state = self.display.snapshot();
        let sent = self
            .send_action
            .send(state.chart.as_ref(), self.selected_session);
        self.presentation_request = Some(PresentationStyle::Compact);
        sent
    }

    /// Show the chart carried by an incoming message. No fetch is issued.
    pub fn receive_message(&mut self, message: ChartMessage) {
        self.selected_session = Some(message.session_id);
        self.display.show_chart(message.attachment);
    }

    /// Abort every fetch still running. Returns how many were aborted.
    pub fn cancel(&mut self) -> usize {
        let mut cancelled = 0;
        for handle in self.in_flight.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            log::info!("cancelled {cancelled} in-flight fetch(es)");
        }
        cancelled
    }

    /// Wait for every tracked fetch, then for the display context to apply
    /// what they posted.
    pub async fn settle(&mut self) {
        for handle in std::mem::take(&mut self.in_flight) {
            if let Err(error) = handle.await {
                if !error.is_cancelled() {
                    log::warn!("fetch task failed: {error}");
                }
            }
        }
        self.display.flush().await;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn search_term(&self) -> &SearchTerm {
        &self.search_term
    }

    pub fn snapshot(&self) -> DisplayState {
        self.display.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }

    /// Presentation change requested since the last call, if any.
    pub fn take_presentation_request(&mut self) -> Option<PresentationStyle> {
        self.presentation_request.take()
    }

    fn refresh(&mut self, selection: TimeRangeSelection) {
        self.spawn_chart_fetch(selection);
        self.spawn_related_fetch();
    }

    fn spawn_chart_fetch(&mut self, selection: TimeRangeSelection) {
        let fetcher = self.chart_fetcher.clone();
        let display = self.display.clone();
        let term = self.search_term.clone();
        log::info!("fetching {term} chart ({selection})");

        let handle = tokio::spawn(async move {
            match fetcher.fetch(&term, &selection).await {
                Ok(chart) => display.show_chart(chart),
                Err(error) => log::debug!("{term} chart ({selection}) left unchanged: {error}"),
            }
        });
        self.track(handle);
    }

    fn spawn_related_fetch(&mut self) {
        let fetcher = self.related_fetcher.clone();
        let display = self.display.clone();
        let term = self.search_term.clone();
        log::debug!("fetching related tickers for {term}");

        let handle = tokio::spawn(async move {
            match fetcher.fetch(&term).await {
                // Every match is published, so the last one stays visible.
                Ok(matches) => {
                    for related in matches {
                        display.show_related_text(related.display_text());
                    }
                }
                Err(error) => log::warn!("related tickers for {term} left unchanged: {error}"),
            }
        });
        self.track(handle);
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.in_flight.retain(|task| !task.is_finished());
        self.in_flight.push(handle);
    }
}
