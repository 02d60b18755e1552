//! History list projection.

use crate::core::Conversation;
use chrono::{DateTime, Local, Utc};

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Conversation id, used by the select and delete actions.
    pub id: String,

    /// Title, or the creation time when untitled.
    pub display_title: String,

    /// Whether this is the active conversation.
    pub is_active: bool,
}

/// Project the stored list into history rows, oldest first.
#[must_use]
pub fn history_entries(conversations: &[Conversation], active_id: &str) -> Vec<HistoryEntry> {
    conversations
        .iter()
        .map(|conv| HistoryEntry {
            id: conv.id.clone(),
            display_title: display_title(conv),
            is_active: conv.id == active_id,
        })
        .collect()
}

fn display_title(conv: &Conversation) -> String {
    if conv.title.is_empty() {
        format_local_time(conv.created_at)
    } else {
        conv.title.clone()
    }
}

/// Format UTC time as local time for display.
#[must_use]
pub fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
