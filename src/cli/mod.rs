//! CLI command implementations.

pub mod chat;
pub mod delete;
pub mod history;
pub mod send;
pub mod show;

use crate::config::Config;
use crate::core::ConversationStore;
use crate::error::Result;
use crate::remote::HttpCompletionClient;
use crate::storage::FileBackend;
use tokio::runtime::Runtime;

/// Open the conversation store configured for this user.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn open_store(config: &Config) -> Result<ConversationStore> {
    let backend = FileBackend::new(config.storage.path.clone(), &config.storage.namespace)?;
    Ok(ConversationStore::open(Box::new(backend)))
}

/// Build the completion client for the configured endpoint.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn completion_client(config: &Config) -> Result<HttpCompletionClient> {
    HttpCompletionClient::new(&config.endpoint.url, config.endpoint.timeout())
}

/// Single-threaded runtime; the only suspension point is the completion call.
fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
