//! File-based storage backend.

use crate::core::Conversation;
use crate::error::Result;
use crate::storage::traits::{ConversationStorage, decode_or_empty};
use std::fs;
use std::io;
use std::path::PathBuf;

/// File-based storage backend with atomic writes.
///
/// The whole conversation list lives in one JSON file named after the
/// namespace key.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
    namespace: String,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: PathBuf, namespace: &str) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            namespace: namespace.to_string(),
        })
    }

    /// Path of the blob file.
    #[must_use]
    pub fn blob_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.json", self.namespace))
    }
}

impl ConversationStorage for FileBackend {
    fn load(&self) -> Vec<Conversation> {
        let path = self.blob_path();
        match fs::read_to_string(&path) {
            Ok(contents) => decode_or_empty(&contents, &self.namespace),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read conversations");
                Vec::new()
            }
        }
    }

    fn save(&self, conversations: &[Conversation]) -> Result<()> {
        let path = self.blob_path();
        let temp = path.with_extension("tmp");

        let contents = serde_json::to_string_pretty(conversations)?;
        fs::write(&temp, &contents)?;

        // Rename over the old blob so readers never see a partial write
        fs::rename(&temp, &path)?;

        tracing::debug!(count = conversations.len(), path = %path.display(), "saved conversations");
        Ok(())
    }
}
