//! `natter delete` command implementation.

use crate::cli::open_store;
use crate::config::Config;
use crate::core::ConversationStore;
use crate::error::{Error, Result};
use crate::render::format_local_time;

/// Run the delete command.
///
/// # Errors
///
/// Returns an error if the conversation is not found or the list cannot
/// be saved.
pub fn run(config: &Config, key: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let label = delete(&mut store, key)?;
    println!("Deleted conversation: {label}");
    Ok(())
}

/// Delete by 1-based position or id, returning a label for the removed entry.
fn delete(store: &mut ConversationStore, key: &str) -> Result<String> {
    let conversation = store
        .resolve(key)
        .ok_or_else(|| Error::ConversationNotFound(key.to_string()))?;

    let label = if conversation.title.is_empty() {
        format_local_time(conversation.created_at)
    } else {
        conversation.title.clone()
    };
    let id = conversation.id.clone();

    store.delete_by_id(&id)?;
    Ok(label)
}
