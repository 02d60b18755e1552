//! In-memory storage backend for testing.

use crate::core::Conversation;
use crate::error::Result;
use crate::storage::traits::{ConversationStorage, DEFAULT_NAMESPACE, decode_or_empty};
use std::sync::RwLock;

/// In-memory storage backend for testing.
///
/// Keeps the serialized blob rather than the values, so decoding behaves
/// exactly like the file backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: RwLock<Option<String>>,
}

impl MemoryBackend {
    /// Create a new, empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with a raw blob.
    #[must_use]
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(raw.into())),
        }
    }

    /// The raw stored blob, if anything has been written.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.blob.read().unwrap().clone()
    }
}

impl ConversationStorage for MemoryBackend {
    fn load(&self) -> Vec<Conversation> {
        let blob = self.blob.read().unwrap();
        blob.as_deref()
            .map(|raw| decode_or_empty(raw, DEFAULT_NAMESPACE))
            .unwrap_or_default()
    }

    fn save(&self, conversations: &[Conversation]) -> Result<()> {
        let raw = serde_json::to_string(conversations)?;
        *self.blob.write().unwrap() = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Message, Role};

    #[test]
    fn load_empty_backend() {
        let store = MemoryBackend::new();
        assert!(store.load().is_empty());
        assert!(store.blob().is_none());
    }

    #[test]
    fn save_and_load() {
        let store = MemoryBackend::new();
        let mut conv = Conversation::new();
        conv.messages.push(Message::new(Role::User, "hello"));

        store.save(std::slice::from_ref(&conv)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![conv]);
    }

    #[test]
    fn save_overwrites_previous_list() {
        let store = MemoryBackend::new();
        store
            .save(&[Conversation::new(), Conversation::new()])
            .unwrap();
        store.save(&[Conversation::new()]).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn malformed_blob_loads_empty() {
        let store = MemoryBackend::with_blob("{ not json");
        assert!(store.load().is_empty());
    }

    #[test]
    fn wrong_schema_loads_empty() {
        let store = MemoryBackend::with_blob(r#"{"name": "not a list"}"#);
        assert!(store.load().is_empty());
    }

    #[test]
    fn concurrent_saves() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryBackend::new());
        let mut handles = vec![];
        for _ in 0..8 {
            let store_clone = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..10 {
                    store_clone.save(&[Conversation::new()]).unwrap();
                    let _ = store_clone.load();
                }
            }));
        }
        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(store.load().len(), 1);
    }
}
