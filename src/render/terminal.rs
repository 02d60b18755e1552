//! Terminal painting of transcript and history projections.

use crate::render::history::HistoryEntry;
use crate::render::transcript::{MessageView, Tone};
use std::io::{self, Write};

/// Sink for rendered projections.
///
/// The controller mutates the store, persists, then calls into the view.
pub trait ChatView {
    /// Replace the whole transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_transcript(&mut self, messages: &[MessageView]) -> io::Result<()>;

    /// Append one element to the transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_message(&mut self, message: &MessageView) -> io::Result<()>;

    /// Show the typing placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_typing(&mut self) -> io::Result<()>;

    /// Remove the typing placeholder.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn hide_typing(&mut self) -> io::Result<()>;

    /// Replace the history list.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn show_history(&mut self, entries: &[HistoryEntry]) -> io::Result<()>;
}

const TYPING_TEXT: &str = "bot> …";

/// Plain-text view over any writer.
#[derive(Debug)]
pub struct TerminalView<W: Write> {
    out: W,
    echo_user: bool,
    show_history_on_change: bool,
}

impl<W: Write> TerminalView<W> {
    /// Create a view writing to `out`.
    ///
    /// `echo_user` controls whether user messages are printed on append;
    /// an interactive session already shows what was typed.
    pub fn new(out: W, echo_user: bool) -> Self {
        Self {
            out,
            echo_user,
            show_history_on_change: false,
        }
    }

    /// Also print the history list whenever the controller refreshes it.
    #[must_use]
    pub fn with_history_updates(mut self, enabled: bool) -> Self {
        self.show_history_on_change = enabled;
        self
    }

    /// Print the history list regardless of the update setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn print_history(&mut self, entries: &[HistoryEntry]) -> io::Result<()> {
        if entries.is_empty() {
            writeln!(self.out, "No conversations yet.")?;
            return self.out.flush();
        }

        for (index, entry) in entries.iter().enumerate() {
            let marker = if entry.is_active { '*' } else { ' ' };
            writeln!(
                self.out,
                "{marker} {:>3}  {}  {}",
                index + 1,
                entry.display_title,
                entry.id
            )?;
        }
        self.out.flush()
    }

    /// Print a free-form line.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_message(&mut self, message: &MessageView) -> io::Result<()> {
        let prefix = match message.tone {
            Tone::User => "you>",
            Tone::Bot => "bot>",
            Tone::Error => "bot!",
            Tone::Typing => return write!(self.out, "{TYPING_TEXT}"),
        };
        let mut lines = message.text.lines();
        writeln!(self.out, "{prefix} {}", lines.next().unwrap_or_default())?;
        for line in lines {
            writeln!(self.out, "     {line}")?;
        }
        Ok(())
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn show_transcript(&mut self, messages: &[MessageView]) -> io::Result<()> {
        for message in messages {
            self.write_message(message)?;
        }
        self.out.flush()
    }

    fn show_message(&mut self, message: &MessageView) -> io::Result<()> {
        if message.tone == Tone::User && !self.echo_user {
            return Ok(());
        }
        self.write_message(message)?;
        self.out.flush()
    }

    fn show_typing(&mut self) -> io::Result<()> {
        self.write_message(&MessageView::typing())?;
        self.out.flush()
    }

    fn hide_typing(&mut self) -> io::Result<()> {
        // Carriage return, then clear the line.
        write!(self.out, "\r\x1b[2K")?;
        self.out.flush()
    }

    fn show_history(&mut self, entries: &[HistoryEntry]) -> io::Result<()> {
        if self.show_history_on_change {
            self.print_history(entries)?;
        }
        Ok(())
    }
}
