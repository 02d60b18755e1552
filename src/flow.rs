//! Submission flow: user input in, bot reply out.
//!
//! A submission is split into [`SubmissionFlow::begin`] and
//! [`SubmissionFlow::finish`] around the completion request. Nothing stops
//! a second submission from beginning while one is outstanding; each reply
//! is appended to whichever conversation is active when it arrives.

use crate::core::{ConversationStore, Message, Role, sanitize};
use crate::error::Result;
use crate::remote::CompletionError;
use crate::render::MessageView;

/// Shown when the endpoint answers without a result.
pub const NO_RESPONSE_MESSAGE: &str = "Sorry, no response received.";

/// Shown when the request fails or the endpoint reports an error.
pub const FAILURE_MESSAGE: &str = "Failed to get response from server.";

/// Whether a reply is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for input.
    #[default]
    Idle,

    /// At least one completion request is in flight.
    Pending,
}

/// A submission whose reply has not arrived yet.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    user_message: String,
    conversation: Vec<Message>,
}

impl PendingRequest {
    /// The trimmed user text that was appended.
    #[must_use]
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Transcript to send, including the new user message.
    #[must_use]
    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }
}

/// Tracks in-flight submissions.
#[derive(Debug, Default)]
pub struct SubmissionFlow {
    in_flight: usize,
}

impl SubmissionFlow {
    /// Create an idle flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FlowState {
        if self.in_flight == 0 {
            FlowState::Idle
        } else {
            FlowState::Pending
        }
    }

    /// Append the user's message and snapshot the transcript to send.
    ///
    /// Blank input is ignored and yields `None`. User text is stored as
    /// typed (trimmed), never sanitized.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation cannot be persisted.
    pub fn begin(
        &mut self,
        store: &mut ConversationStore,
        input: &str,
    ) -> Result<Option<PendingRequest>> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }

        store.append_message(Role::User, text)?;
        self.in_flight += 1;
        tracing::debug!(in_flight = self.in_flight, "submission pending");

        Ok(Some(PendingRequest {
            user_message: text.to_string(),
            conversation: store.active().messages.clone(),
        }))
    }

    /// Append the reply (or a failure notice) for a finished request.
    ///
    /// Returns the view to paint. The flow leaves `Pending` once every
    /// begun request has finished, even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation cannot be persisted.
    pub fn finish(
        &mut self,
        store: &mut ConversationStore,
        outcome: std::result::Result<Option<String>, CompletionError>,
    ) -> Result<MessageView> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let view = reply_view(outcome);
        store.append_message(Role::Bot, view.text.clone())?;
        Ok(view)
    }
}

/// Map a completion outcome to the bot message to store and show.
#[must_use]
pub fn reply_view(outcome: std::result::Result<Option<String>, CompletionError>) -> MessageView {
    match outcome {
        Ok(Some(text)) if !text.is_empty() => MessageView::bot(sanitize(&text)),
        Ok(_) => {
            tracing::warn!("completion endpoint returned no result");
            MessageView::error(NO_RESPONSE_MESSAGE)
        }
        Err(e) => {
            tracing::warn!(error = %e, "completion request failed");
            MessageView::error(FAILURE_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Tone;
    use crate::storage::MemoryBackend;

    fn open_store() -> ConversationStore {
        ConversationStore::open(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();

        assert!(flow.begin(&mut store, "   \n").unwrap().is_none());
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(store.active().is_empty());
    }

    #[test]
    fn begin_appends_trimmed_user_text_unsanitized() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();

        let pending = flow.begin(&mut store, "  **Hello**  ").unwrap().unwrap();

        assert_eq!(pending.user_message(), "**Hello**");
        assert_eq!(store.active().messages[0], Message::new(Role::User, "**Hello**"));
        assert_eq!(pending.conversation().len(), 1);
        assert_eq!(flow.state(), FlowState::Pending);
    }

    #[test]
    fn finish_sanitizes_reply() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();
        flow.begin(&mut store, "Hello").unwrap();

        let view = flow
            .finish(&mut store, Ok(Some("**Hi** there".to_string())))
            .unwrap();

        assert_eq!(view, MessageView::bot("Hi there"));
        assert_eq!(store.active().messages[1], Message::new(Role::Bot, "Hi there"));
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn missing_result_stores_fallback() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();
        flow.begin(&mut store, "Hello").unwrap();

        let view = flow.finish(&mut store, Ok(None)).unwrap();

        assert_eq!(view.tone, Tone::Error);
        assert_eq!(view.text, NO_RESPONSE_MESSAGE);
        assert_eq!(store.active().messages[1].role, Role::Bot);
    }

    #[test]
    fn empty_result_stores_fallback() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();
        flow.begin(&mut store, "Hello").unwrap();

        let view = flow.finish(&mut store, Ok(Some(String::new()))).unwrap();
        assert_eq!(view.text, NO_RESPONSE_MESSAGE);
    }

    #[test]
    fn failure_stores_error_notice() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();
        flow.begin(&mut store, "Hello").unwrap();

        let view = flow
            .finish(&mut store, Err(CompletionError::Status(502)))
            .unwrap();

        assert_eq!(view, MessageView::error(FAILURE_MESSAGE));
        assert_eq!(store.active().messages[1].text, FAILURE_MESSAGE);
    }

    #[test]
    fn overlapping_requests_append_in_arrival_order() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();

        let first = flow.begin(&mut store, "one").unwrap().unwrap();
        let second = flow.begin(&mut store, "two").unwrap().unwrap();
        assert_eq!(first.conversation().len(), 1);
        assert_eq!(second.conversation().len(), 2);

        let reply_two = Ok(Some("reply two".to_string()));
        flow.finish(&mut store, reply_two).unwrap();
        assert_eq!(flow.state(), FlowState::Pending);
        let reply_one = Ok(Some("reply one".to_string()));
        flow.finish(&mut store, reply_one).unwrap();
        assert_eq!(flow.state(), FlowState::Idle);

        let texts: Vec<&str> = store
            .active()
            .messages
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two", "reply two", "reply one"]);
    }

    #[test]
    fn reply_lands_in_conversation_active_on_arrival() {
        let mut store = open_store();
        let mut flow = SubmissionFlow::new();

        flow.begin(&mut store, "question").unwrap();
        let asked_in = store.active().id.clone();
        store.create_new(true).unwrap();

        flow.finish(&mut store, Ok(Some("answer".to_string())))
            .unwrap();

        assert_ne!(store.active().id, asked_in);
        assert_eq!(store.active().messages[0].text, "answer");
        let original = store.resolve(&asked_in).unwrap();
        assert_eq!(original.messages.len(), 1);
    }
}
