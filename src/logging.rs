//! Tracing subscriber setup.

use crate::config::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured filter; `verbose` raises the
/// crate's own level to debug.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{},natter=debug", config.filter))
        } else {
            EnvFilter::new(&config.filter)
        }
    });

    let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };

    if let Err(e) = result {
        eprintln!("natter: warning: logging already initialized: {e}");
    }
}
