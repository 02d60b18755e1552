//! `natter send` command implementation.

use crate::cli::{completion_client, open_store, runtime};
use crate::config::Config;
use crate::controller::ChatController;
use crate::error::{Error, Result};
use crate::render::TerminalView;
use std::io;

/// Run the send command.
///
/// Submits one message to the most recent conversation (or a new one)
/// and prints the reply.
///
/// # Errors
///
/// Returns an error if the message is blank, or if storage or the HTTP
/// client fails. Endpoint failures are printed as the reply instead.
pub fn run(config: &Config, message: &str, new: bool) -> Result<()> {
    if message.trim().is_empty() {
        return Err(Error::InvalidInput("message cannot be empty".to_string()));
    }

    let store = open_store(config)?;
    let client = completion_client(config)?;
    let mut chat = ChatController::new(store, client, TerminalView::new(io::stdout(), false));

    if new {
        chat.new_conversation()?;
    }

    runtime()?.block_on(chat.submit(message))?;
    Ok(())
}
