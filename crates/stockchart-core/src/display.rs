//! Display context: the single place display state is written.
//!
//! Fetch tasks never touch [`DisplayState`] directly. They post a
//! [`DisplayUpdate`] to the context, which applies updates one at a time in
//! arrival order and republishes the state to subscribers. Whichever fetch
//! completes last decides what is shown.

use tokio::sync::{mpsc, oneshot, watch};

use crate::domain::ChartImage;

/// Everything currently shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub chart: Option<ChartImage>,
    pub related_text: Option<String>,
    /// Incremented on every applied write.
    pub revision: u64,
}

/// Write posted to the display context.
#[derive(Debug)]
pub enum DisplayUpdate {
    Chart(ChartImage),
    RelatedText(String),
    /// Acknowledged once every earlier update has been applied.
    Flush(oneshot::Sender<()>),
}

/// Sending side of the display context plus a view of its state.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    updates: mpsc::UnboundedSender<DisplayUpdate>,
    state: watch::Receiver<DisplayState>,
}

impl DisplayHandle {
    /// Spawn the context task. Must be called inside a tokio runtime. The
    /// task exits once every handle has been dropped.
    pub fn spawn() -> Self {
        let (updates, mut receiver) = mpsc::unbounded_channel::<DisplayUpdate>();
        let (publisher, state) = watch::channel(DisplayState::default());

        tokio::spawn(async move {
            while let Some(update) = receiver.recv().await {
                apply(&publisher, update);
            }
            log::debug!("display context closed");
        });

        Self { updates, state }
    }

    pub fn show_chart(&self, chart: ChartImage) {
        self.post(DisplayUpdate::Chart(chart));
    }

    pub fn show_related_text(&self, text: String) {
        self.post(DisplayUpdate::RelatedText(text));
    }

    /// Wait until every update posted before this call has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.post(DisplayUpdate::Flush(ack));
        let _ = done.await;
    }

    pub fn snapshot(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.clone()
    }

    fn post(&self, update: DisplayUpdate) {
        if self.updates.send(update).is_err() {
            log::debug!("display context is gone; dropping update");
        }
    }
}

fn apply(publisher: &watch::Sender<DisplayState>, update: DisplayUpdate) {
    match update {
        DisplayUpdate::Chart(chart) => publisher.send_modify(|state| {
            state.chart = Some(chart);
            state.revision += 1;
        }),
        DisplayUpdate::RelatedText(text) => publisher.send_modify(|state| {
            state.related_text = Some(text);
            state.revision += 1;
        }),
        DisplayUpdate::Flush(ack) => {
            let _ = ack.send(());
        }
    }
}
