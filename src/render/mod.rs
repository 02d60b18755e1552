//! Projections of the conversation store and their terminal rendering.

pub mod history;
pub mod recording;
pub mod terminal;
pub mod transcript;

pub use history::{HistoryEntry, format_local_time, history_entries};
pub use recording::RecordingView;
pub use terminal::{ChatView, TerminalView};
pub use transcript::{MessageView, Tone, transcript};
