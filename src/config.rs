//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`NATTER_*`)
//! 2. Config file (`~/.natter/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use crate::storage::DEFAULT_NAMESPACE;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Completion endpoint configuration.
    pub endpoint: EndpointConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the conversation blob.
    pub path: PathBuf,

    /// Namespace key; the blob is stored as `<namespace>.json`.
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_natter_home(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Completion endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// URL the transcript is POSTed to.
    pub url: String,

    /// HTTP client timeout in seconds.
    pub timeout_seconds: u64,
}

impl EndpointConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/api/chat".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `natter=debug`.
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json: false,
        }
    }
}

/// Get the default natter home directory.
fn default_natter_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".natter"), |h| h.join(".natter"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("NATTER_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("NATTER_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_natter_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("NATTER_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("NATTER_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    if let Ok(namespace) = env::var("NATTER_NAMESPACE") {
        if !namespace.is_empty() {
            config.storage.namespace = namespace;
        }
    }

    if let Ok(url) = env::var("NATTER_ENDPOINT") {
        config.endpoint.url = url;
    }

    if let Ok(val) = env::var("NATTER_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.endpoint.timeout_seconds = secs;
        }
    }

    if let Ok(filter) = env::var("NATTER_LOG") {
        config.logging.filter = filter;
    }
}
