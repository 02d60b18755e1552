//! Storage backends for the conversation list.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use traits::{ConversationStorage, DEFAULT_NAMESPACE};
