//! natter CLI - terminal chat client.

use clap::{Parser, Subcommand};
use natter::cli;
use natter::config::load_config;
use natter::logging::init_logging;
use std::process::ExitCode;

/// Version shown by `--version`.
///
/// Tagged builds print the bare package version. Anything else appends
/// `-dev` and the commit stamp from `build.rs`, e.g. `0.1.0-dev (3f9c2e1)`.
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("NATTER_GIT_HASH");
    const IS_RELEASE: &str = env!("NATTER_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "natter")]
#[command(author, version = version())]
#[command(about = "Terminal chat client with local history", long_about = None)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default).
    Chat,

    /// Send one message and print the reply.
    Send {
        /// Message text.
        message: String,

        /// Start a new conversation instead of continuing the most recent.
        #[arg(short, long)]
        new: bool,
    },

    /// List stored conversations.
    History,

    /// Print a conversation transcript.
    Show {
        /// Conversation number (from `history`) or id. Defaults to the most recent.
        conversation: Option<String>,
    },

    /// Delete a conversation.
    Delete {
        /// Conversation number (from `history`) or id.
        conversation: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("natter: error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging, cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => cli::chat::run(&config),
        Commands::Send { message, new } => cli::send::run(&config, &message, new),
        Commands::History => cli::history::run(&config),
        Commands::Show { conversation } => cli::show::run(&config, conversation.as_deref()),
        Commands::Delete { conversation } => cli::delete::run(&config, &conversation),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("natter: error: {e}");
            ExitCode::FAILURE
        }
    }
}
