//! Conversation store: the stored list plus the active conversation.
//!
//! The active conversation is always a value copy. It is written back to
//! the list (and the list persisted) whenever it gains a message, so the
//! list never holds two entries with the same id.

use crate::core::conversation::{Conversation, Message, Role};
use crate::error::Result;
use crate::storage::ConversationStorage;

/// In-memory conversation state synchronized with a storage backend.
pub struct ConversationStore {
    storage: Box<dyn ConversationStorage>,
    conversations: Vec<Conversation>,
    active: Conversation,
}

impl ConversationStore {
    /// Load the stored list and activate the most recent conversation.
    ///
    /// Starts a fresh, unsaved conversation when nothing is stored.
    #[must_use]
    pub fn open(storage: Box<dyn ConversationStorage>) -> Self {
        let conversations = storage.load();
        let active = conversations.last().cloned().unwrap_or_default();
        tracing::debug!(
            stored = conversations.len(),
            active = %active.id,
            "opened conversation store"
        );
        Self {
            storage,
            conversations,
            active,
        }
    }

    /// All stored conversations, oldest first.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The active conversation.
    #[must_use]
    pub fn active(&self) -> &Conversation {
        &self.active
    }

    /// Look up a stored conversation by 1-based list position or by id.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Conversation> {
        if let Ok(position) = key.parse::<usize>() {
            if let Some(conv) = position
                .checked_sub(1)
                .and_then(|index| self.conversations.get(index))
            {
                return Some(conv);
            }
        }
        self.conversations.iter().find(|c| c.id == key)
    }

    /// Start a new conversation and make it active.
    ///
    /// When `save_current` is set and the active conversation has messages,
    /// it is titled (if untitled) and written back first. The new
    /// conversation is not persisted until it gains a message.
    ///
    /// # Errors
    ///
    /// Returns an error if writing back the current conversation fails.
    pub fn create_new(&mut self, save_current: bool) -> Result<()> {
        if save_current && !self.active.is_empty() {
            self.stash_active()?;
        }
        self.active = Conversation::new();
        tracing::debug!(id = %self.active.id, "started conversation");
        Ok(())
    }

    /// Insert or replace a conversation by id, then persist the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn upsert(&mut self, conversation: Conversation) -> Result<()> {
        match self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation.id)
        {
            Some(existing) => *existing = conversation,
            None => self.conversations.push(conversation),
        }
        self.persist()
    }

    /// Activate a stored conversation.
    ///
    /// Returns `false` and changes nothing when `id` is unknown. Otherwise
    /// the current conversation is written back first if it has messages.
    ///
    /// # Errors
    ///
    /// Returns an error if writing back the current conversation fails.
    pub fn load_by_id(&mut self, id: &str) -> Result<bool> {
        let Some(found) = self.conversations.iter().find(|c| c.id == id).cloned() else {
            tracing::debug!(id, "ignoring load of unknown conversation");
            return Ok(false);
        };

        if self.active.id != id && !self.active.is_empty() {
            self.stash_active()?;
        }

        self.active = found;
        tracing::debug!(id, "loaded conversation");
        Ok(true)
    }

    /// Delete a stored conversation.
    ///
    /// If it was active, the most recent remaining conversation becomes
    /// active, or a fresh one when none remain. Returns whether an entry
    /// was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn delete_by_id(&mut self, id: &str) -> Result<bool> {
        let was_active = self.active.id == id;
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        let removed = self.conversations.len() != before;
        self.persist()?;
        tracing::debug!(id, removed, was_active, "deleted conversation");

        if was_active {
            // Drop the deleted copy so activating the next entry can't write it back.
            self.active = Conversation::new();
            match self.conversations.last().map(|c| c.id.clone()) {
                Some(last) => {
                    self.load_by_id(&last)?;
                }
                None => self.create_new(false)?,
            }
        } else if self.conversations.is_empty() {
            self.create_new(false)?;
        }

        Ok(removed)
    }

    /// Append a message to the active conversation and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn append_message(&mut self, role: Role, text: impl Into<String>) -> Result<()> {
        self.active.messages.push(Message::new(role, text));
        let snapshot = self.active.clone();
        self.upsert(snapshot)
    }

    /// Set the active conversation's title.
    ///
    /// Persisted right away only if the conversation is already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.active.title = title.into();
        if self.active.is_empty() {
            return Ok(());
        }
        let snapshot = self.active.clone();
        self.upsert(snapshot)
    }

    /// Title the active conversation if needed and write it back.
    fn stash_active(&mut self) -> Result<()> {
        self.active.ensure_title(self.conversations.len());
        let snapshot = self.active.clone();
        self.upsert(snapshot)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.conversations)
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("conversations", &self.conversations.len())
            .field("active", &self.active.id)
            .finish_non_exhaustive()
    }
}
