//! UI controller: binds user actions to the store, the completion client
//! and the view.
//!
//! Every handler mutates the store (which persists), then repaints.

use crate::core::ConversationStore;
use crate::error::{Error, Result};
use crate::flow::{FlowState, SubmissionFlow};
use crate::remote::CompletionClient;
use crate::render::{ChatView, MessageView, history_entries, transcript};

/// Owns the conversation store and drives a view.
pub struct ChatController<C, V> {
    store: ConversationStore,
    client: C,
    view: V,
    flow: SubmissionFlow,
}

impl<C: CompletionClient, V: ChatView> ChatController<C, V> {
    /// Create a controller. Call [`ChatController::start`] to paint.
    pub fn new(store: ConversationStore, client: C, view: V) -> Self {
        Self {
            store,
            client,
            view,
            flow: SubmissionFlow::new(),
        }
    }

    /// The conversation store.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// The view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, for output outside the projections.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Submission state.
    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    /// Paint the transcript and history for the first time.
    ///
    /// # Errors
    ///
    /// Returns an error if the view cannot be written.
    pub fn start(&mut self) -> Result<()> {
        self.repaint()
    }

    /// Submit user input and wait for the reply.
    ///
    /// Returns the reply view, or `None` when the input was blank. Once the
    /// user message is stored the request is always issued and the reply
    /// always stored, even if painting fails along the way.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or painting fails. Completion
    /// failures are not errors; they become error-toned bot messages.
    pub async fn submit(&mut self, input: &str) -> Result<Option<MessageView>> {
        let Some(pending) = self.flow.begin(&mut self.store, input)? else {
            return Ok(None);
        };
        let painted = self.paint_pending(pending.user_message());

        let outcome = self.client.complete(pending.conversation()).await;

        let reply = self.flow.finish(&mut self.store, outcome)?;
        let repainted = self.paint_reply(&reply);
        painted.and(repainted)?;
        Ok(Some(reply))
    }

    /// Save the current conversation if it has content and start a new one.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting or painting fails.
    pub fn new_conversation(&mut self) -> Result<()> {
        self.store.create_new(true)?;
        self.repaint()
    }

    /// Select a history entry by 1-based position or id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConversationNotFound`] for an unknown entry, or an
    /// error if persisting or painting fails.
    pub fn select(&mut self, key: &str) -> Result<()> {
        let id = self.resolve_id(key)?;
        self.store.load_by_id(&id)?;
        self.repaint()
    }

    /// Delete a history entry by 1-based position or id.
    ///
    /// Deleting never also selects the entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConversationNotFound`] for an unknown entry, or an
    /// error if persisting or painting fails.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let id = self.resolve_id(key)?;
        self.store.delete_by_id(&id)?;
        self.repaint()
    }

    /// Set the active conversation's title.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank, or if persisting or painting
    /// fails.
    pub fn rename(&mut self, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }
        self.store.set_title(title)?;
        self.repaint_history()
    }

    fn resolve_id(&self, key: &str) -> Result<String> {
        self.store
            .resolve(key)
            .map(|c| c.id.clone())
            .ok_or_else(|| Error::ConversationNotFound(key.to_string()))
    }

    fn paint_pending(&mut self, user_message: &str) -> Result<()> {
        self.view.show_message(&MessageView::user(user_message))?;
        self.repaint_history()?;
        self.view.show_typing()?;
        Ok(())
    }

    fn paint_reply(&mut self, reply: &MessageView) -> Result<()> {
        self.view.hide_typing()?;
        self.view.show_message(reply)?;
        self.repaint_history()
    }

    fn repaint(&mut self) -> Result<()> {
        self.view.show_transcript(&transcript(self.store.active()))?;
        self.repaint_history()
    }

    fn repaint_history(&mut self) -> Result<()> {
        let entries = history_entries(self.store.conversations(), &self.store.active().id);
        self.view.show_history(&entries)?;
        Ok(())
    }
}

impl<C, V> std::fmt::Debug for ChatController<C, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("store", &self.store)
            .field("flow", &self.flow)
            .finish_non_exhaustive()
    }
}
