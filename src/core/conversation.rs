//! Conversation and message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a derived title, in characters.
pub const TITLE_MAX_CHARS: usize = 40;

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard.
    User,

    /// Returned by the completion endpoint (or a local failure notice).
    Bot,
}

/// A single transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Author of the message.
    pub role: Role,

    /// Plain display text.
    pub text: String,
}

impl Message {
    /// Create a new message.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// A conversation as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Opaque unique identifier, never reused.
    pub id: String,

    /// Short title; empty until assigned or derived.
    #[serde(default)]
    pub title: String,

    /// When the conversation was created.
    pub created_at: DateTime<Utc>,

    /// Messages in transcript order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    /// Whether the conversation has any messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Title derived from the first user message.
    ///
    /// Falls back to `Chat {stored + 1}` when there is no user text, where
    /// `stored` is the number of conversations already in the list.
    #[must_use]
    pub fn derive_title(&self, stored: usize) -> String {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .filter(|m| !m.text.is_empty())
            .map_or_else(
                || format!("Chat {}", stored + 1),
                |m| truncate(&m.text, TITLE_MAX_CHARS),
            )
    }

    /// Assign a derived title if none is set.
    pub fn ensure_title(&mut self, stored: usize) {
        if self.title.is_empty() {
            self.title = self.derive_title(stored);
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to at most `max` characters, ending in an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
