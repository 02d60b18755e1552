//! Transcript projection.

use crate::core::{Conversation, Role};

/// Display tag of a transcript element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// User-authored text.
    User,

    /// Bot reply.
    Bot,

    /// Bot-role failure notice.
    Error,

    /// Transient placeholder while a reply is outstanding.
    Typing,
}

/// One element of the rendered transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    /// How the element is styled.
    pub tone: Tone,

    /// Text shown.
    pub text: String,
}

impl MessageView {
    /// A user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::User,
            text: text.into(),
        }
    }

    /// A bot reply.
    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Bot,
            text: text.into(),
        }
    }

    /// A failure notice, stored as a bot message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    /// The typing placeholder.
    #[must_use]
    pub fn typing() -> Self {
        Self {
            tone: Tone::Typing,
            text: String::new(),
        }
    }
}

/// Project a conversation into transcript elements.
///
/// Stored text is already sanitized and is shown as is. Failure notices
/// are stored as plain bot messages, so they redisplay with the bot tone.
#[must_use]
pub fn transcript(conversation: &Conversation) -> Vec<MessageView> {
    conversation
        .messages
        .iter()
        .map(|m| match m.role {
            Role::User => MessageView::user(m.text.clone()),
            Role::Bot => MessageView::bot(m.text.clone()),
        })
        .collect()
}
