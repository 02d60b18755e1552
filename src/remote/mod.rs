//! Completion endpoint clients.

pub mod client;
pub mod http;

pub use client::{CompletionClient, CompletionError, ScriptedClient};
pub use http::HttpCompletionClient;
