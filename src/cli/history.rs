//! `natter history` command implementation.

use crate::cli::open_store;
use crate::config::Config;
use crate::error::Result;
use crate::render::{TerminalView, history_entries};
use std::io;

/// Run the history command.
///
/// Lists stored conversations, oldest first; the most recent one is
/// marked active.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn run(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let entries = history_entries(store.conversations(), &store.active().id);

    let mut view = TerminalView::new(io::stdout(), true);
    view.print_history(&entries)?;

    if entries.is_empty() {
        println!(
            "\nConversations are stored in: {}",
            config.storage.path.display()
        );
    }
    Ok(())
}
