//! natter - terminal chat client with local conversation history.
//!
//! Conversations are kept in a single JSON blob; the active conversation
//! is sent to a completion endpoint and replies are stored as plain text.

pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod flow;
pub mod logging;
pub mod remote;
pub mod render;
pub mod storage;

pub use config::Config;
pub use controller::ChatController;
pub use error::{Error, Result};
