//! HTTP implementation of the completion endpoint contract.

use crate::core::Message;
use crate::remote::client::{CompletionClient, CompletionError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body: the whole transcript.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    conversation: &'a [Message],
}

/// Response body; `result` may be absent.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    result: Option<String>,
}

/// Completion client that POSTs JSON to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: Client,
    url: String,
}

impl HttpCompletionClient {
    /// Create a client for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// The endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, conversation: &[Message]) -> Result<Option<String>, CompletionError> {
        tracing::debug!(url = %self.url, messages = conversation.len(), "requesting completion");

        let response = self
            .client
            .post(&self.url)
            .json(&CompletionRequest { conversation })
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Status(status.as_u16()));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        Ok(body.result)
    }
}
