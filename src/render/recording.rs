//! In-memory view for testing.

use crate::render::history::HistoryEntry;
use crate::render::terminal::ChatView;
use crate::render::transcript::MessageView;
use std::io;

/// View that records what was painted.
#[derive(Debug, Default)]
pub struct RecordingView {
    /// Current transcript.
    pub transcript: Vec<MessageView>,

    /// Last history list painted.
    pub history: Vec<HistoryEntry>,

    /// Whether the typing placeholder is showing.
    pub typing: bool,

    /// How many times the typing placeholder was shown.
    pub typing_shown: usize,
}

impl RecordingView {
    /// Create an empty recording view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatView for RecordingView {
    fn show_transcript(&mut self, messages: &[MessageView]) -> io::Result<()> {
        self.transcript = messages.to_vec();
        Ok(())
    }

    fn show_message(&mut self, message: &MessageView) -> io::Result<()> {
        self.transcript.push(message.clone());
        Ok(())
    }

    fn show_typing(&mut self) -> io::Result<()> {
        self.typing = true;
        self.typing_shown += 1;
        Ok(())
    }

    fn hide_typing(&mut self) -> io::Result<()> {
        self.typing = false;
        Ok(())
    }

    fn show_history(&mut self, entries: &[HistoryEntry]) -> io::Result<()> {
        self.history = entries.to_vec();
        Ok(())
    }
}
