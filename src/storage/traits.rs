//! Storage trait definitions.

use crate::core::Conversation;
use crate::error::Result;

/// Default namespace key the conversation list is stored under.
pub const DEFAULT_NAMESPACE: &str = "chat_conversations";

/// Durable blob store for the conversation list.
pub trait ConversationStorage: Send + Sync {
    /// Load the stored conversation list.
    ///
    /// Missing or malformed data yields an empty list; this never fails.
    fn load(&self) -> Vec<Conversation>;

    /// Replace the stored conversation list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    fn save(&self, conversations: &[Conversation]) -> Result<()>;
}

/// Decode a stored blob, treating anything unreadable as empty.
pub(crate) fn decode_or_empty(raw: &str, namespace: &str) -> Vec<Conversation> {
    match serde_json::from_str(raw) {
        Ok(conversations) => conversations,
        Err(e) => {
            tracing::warn!(namespace, error = %e, "ignoring malformed conversation data");
            Vec::new()
        }
    }
}
