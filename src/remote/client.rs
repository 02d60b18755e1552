//! Completion endpoint contract.

use crate::core::Message;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Failure talking to the completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Remote service that turns a transcript into a reply.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the full transcript and return the reply text, if any.
    ///
    /// `Ok(None)` means the endpoint answered successfully without a result.
    async fn complete(&self, conversation: &[Message]) -> Result<Option<String>, CompletionError>;
}

/// Completion client that replays scripted outcomes, for testing.
///
/// Each call pops the next outcome; an exhausted script answers with no
/// result. Every request transcript is recorded.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    outcomes: Mutex<VecDeque<Result<Option<String>, CompletionError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    /// Create a client with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    #[must_use]
    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(Some(text.to_string())))
    }

    /// Queue a successful response that carries no result.
    #[must_use]
    pub fn empty(self) -> Self {
        self.push(Ok(None))
    }

    /// Queue a failure.
    #[must_use]
    pub fn fail(self, error: CompletionError) -> Self {
        self.push(Err(error))
    }

    /// Transcripts received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    fn push(self, outcome: Result<Option<String>, CompletionError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, conversation: &[Message]) -> Result<Option<String>, CompletionError> {
        self.requests.lock().unwrap().push(conversation.to_vec());
        let next = self.outcomes.lock().unwrap().pop_front();
        next.unwrap_or(Ok(None))
    }
}
