//! `natter show` command implementation.

use crate::cli::open_store;
use crate::config::Config;
use crate::core::Conversation;
use crate::error::{Error, Result};
use crate::render::{ChatView, TerminalView, format_local_time, transcript};
use std::io::{self, Write};

/// Run the show command.
///
/// Prints a stored conversation, by 1-based position or id; the most
/// recent one when no key is given.
///
/// # Errors
///
/// Returns an error if the conversation is not found.
pub fn run(config: &Config, key: Option<&str>) -> Result<()> {
    let store = open_store(config)?;

    let conversation = match key {
        Some(key) => store
            .resolve(key)
            .ok_or_else(|| Error::ConversationNotFound(key.to_string()))?,
        None => store
            .conversations()
            .last()
            .ok_or_else(|| Error::ConversationNotFound("(none stored)".to_string()))?,
    };

    let mut out = io::stdout();
    write_header(&mut out, conversation)?;

    let mut view = TerminalView::new(out, true);
    view.show_transcript(&transcript(conversation))?;
    Ok(())
}

fn write_header(out: &mut impl Write, conversation: &Conversation) -> io::Result<()> {
    let title: &str = if conversation.title.is_empty() {
        "(untitled)"
    } else {
        &conversation.title
    };
    writeln!(out, "Conversation: {title}")?;
    writeln!(out, "Id: {}", conversation.id)?;
    writeln!(out, "Created: {}", format_local_time(conversation.created_at))?;
    writeln!(out, "Messages: {}", conversation.messages.len())?;
    writeln!(out, "{}", "─".repeat(60))
}
