//! Error types for natter.

use std::io;
use thiserror::Error;

/// Result type alias for natter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in natter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// HTTP client construction error.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Conversation not found.
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    /// Malformed command-line or interactive input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
