//! Conversation model, store and text sanitizing.

pub mod conversation;
pub mod sanitize;
pub mod store;

pub use conversation::{Conversation, Message, Role, TITLE_MAX_CHARS, truncate};
pub use sanitize::sanitize;
pub use store::ConversationStore;
