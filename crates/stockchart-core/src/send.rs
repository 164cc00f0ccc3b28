//! Packaging the displayed chart into a conversation message.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::ChartImage;

/// Message carrying a chart attachment, sent or received in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartMessage {
    /// Conversation session the message belongs to.
    pub session_id: Uuid,
    pub attachment: ChartImage,
}

impl ChartMessage {
    /// Join `session_id` when a message is selected, otherwise open a new session.
    pub fn new(attachment: ChartImage, session_id: Option<Uuid>) -> Self {
        Self {
            session_id: session_id.unwrap_or_else(Uuid::new_v4),
            attachment,
        }
    }
}

/// Host messaging collaborator. Delivery is fire-and-forget: there is no
/// completion and failures are not reported back.
pub trait MessageComposer: Send + Sync {
    fn insert(&self, message: ChartMessage);
}

/// Hands the displayed chart to a [`MessageComposer`].
#[derive(Clone)]
pub struct SendChartAction {
    composer: Arc<dyn MessageComposer>,
}

impl SendChartAction {
    pub fn new(composer: Arc<dyn MessageComposer>) -> Self {
        Self { composer }
    }

    /// Send `chart` if there is one. Returns whether a message was handed off.
    pub fn send(&self, chart: Option<&ChartImage>, session_id: Option<Uuid>) -> bool {
        let Some(chart) = chart else {
            log::debug!("no chart on display; nothing to send");
            return false;
        };

        log::info!(
            "sending {} chart ({}) as message attachment",
            chart.search_term(),
            chart.selection()
        );
        self.composer
            .insert(ChartMessage::new(chart.clone(), session_id));
        true
    }
}

/// Composer that drops each attachment into a directory, one file per
/// message.
#[derive(Debug)]
pub struct DirectoryOutbox {
    dir: PathBuf,
    sent: AtomicU64,
}

impl DirectoryOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sent: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for the `sequence`-th message.
    pub fn file_name(message: &ChartMessage, sequence: u64) -> String {
        let chart = &message.attachment;
        format!(
            "{}-{}-{}-{sequence}.{}",
            file_safe(chart.search_term().as_str()),
            file_safe(&chart.selection().range),
            file_safe(&chart.selection().interval),
            chart.extension()
        )
    }

    fn write(&self, message: &ChartMessage) -> std::io::Result<PathBuf> {
        let sequence = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(message, sequence));
        fs::write(&path, message.attachment.bytes())?;
        Ok(path)
    }
}

impl MessageComposer for DirectoryOutbox {
    fn insert(&self, message: ChartMessage) {
        match self.write(&message) {
            Ok(path) => log::info!(
                "message {} written to {}",
                message.session_id,
                path.display()
            ),
            Err(error) => log::warn!("outbox write failed: {error}"),
        }
    }
}

fn file_safe(value: &str) -> String {
    let cleaned = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();

    if cleaned.is_empty() {
        String::from("_")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Preset, SearchTerm, TimeRangeSelection};
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingComposer {
        messages: Mutex<Vec<ChartMessage>>,
    }

    impl MessageComposer for RecordingComposer {
        fn insert(&self, message: ChartMessage) {
            self.messages
                .lock()
                .expect("message store should not be poisoned")
                .push(message);
        }
    }

    fn chart(ticker: &str, selection: TimeRangeSelection) -> ChartImage {
        let image = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 10, 10]));
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, image::ImageFormat::Png)
            .expect("png encoding should succeed");
        ChartImage::decode(cursor.into_inner(), SearchTerm::from(ticker), selection)
            .expect("png should decode")
    }

    #[test]
    fn nothing_displayed_sends_nothing() {
        let composer = Arc::new(RecordingComposer::default());
        let action = SendChartAction::new(composer.clone());

        assert!(!action.send(None, None));
        assert!(composer.messages.lock().expect("lock").is_empty());
    }

    #[test]
    fn selected_session_is_reused() {
        let composer = Arc::new(RecordingComposer::default());
        let action = SendChartAction::new(composer.clone());
        let session_id = Uuid::new_v4();
        let chart = chart("AAPL", TimeRangeSelection::default());

        assert!(action.send(Some(&chart), Some(session_id)));

        let messages = composer.messages.lock().expect("lock");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].session_id, session_id);
        assert_eq!(messages[0].attachment, chart);
    }

    #[test]
    fn outbox_writes_one_file_per_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outbox = DirectoryOutbox::new(dir.path().join("outbox"));

        outbox.insert(ChartMessage::new(chart("AAPL", Preset::Max.selection()), None));
        outbox.insert(ChartMessage::new(chart("AAPL", Preset::Max.selection()), None));

        let first = dir.path().join("outbox").join("AAPL-1825-w-1.png");
        let second = dir.path().join("outbox").join("AAPL-1825-w-2.png");
        assert!(first.exists());
        assert!(second.exists());
    }

    #[test]
    fn file_names_replace_path_characters() {
        let message = ChartMessage::new(chart("../x y", TimeRangeSelection::default()), None);
        assert_eq!(DirectoryOutbox::file_name(&message, 3), ".._x_y-180-d-3.png");
    }
}
