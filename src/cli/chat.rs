//! `natter chat` command implementation.

use crate::cli::{completion_client, open_store, runtime};
use crate::config::Config;
use crate::controller::ChatController;
use crate::error::{Error, Result};
use crate::remote::CompletionClient;
use crate::render::{TerminalView, history_entries};
use std::io::{self, BufRead, Stdout, Write};

const HELP: &str = "\
Type a message and press Enter to send it.

Commands:
  /new            start a new conversation
  /history        list conversations
  /open <n|id>    switch to a conversation
  /delete <n|id>  delete a conversation
  /title <text>   rename the current conversation
  /help           show this help
  /quit           leave";

const GREETING: &str = "natter: type /help for commands, /quit to leave";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Message(String),
    New,
    History,
    Open(String),
    Delete(String),
    Title(String),
    Help,
    Quit,
}

/// Run the interactive chat session.
///
/// # Errors
///
/// Returns an error if storage, the HTTP client, or the terminal cannot be
/// set up. Failures while chatting are reported and the session goes on.
pub fn run(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let client = completion_client(config)?;
    let view = TerminalView::new(io::stdout(), false);
    let mut chat = ChatController::new(store, client, view);

    tracing::info!(endpoint = %config.endpoint.url, "starting chat session");
    runtime()?.block_on(session(&mut chat))
}

async fn session<C: CompletionClient>(
    chat: &mut ChatController<C, TerminalView<Stdout>>,
) -> Result<()> {
    chat.view_mut().notice(GREETING)?;
    chat.start()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };

        let input = match parse_input(&line?) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                chat.view_mut().notice(&format!("natter: {e}"))?;
                continue;
            }
        };

        if input == Input::Quit {
            return Ok(());
        }

        if let Err(e) = handle(chat, input).await {
            tracing::error!(error = %e, "chat action failed");
            chat.view_mut().notice(&format!("natter: error: {e}"))?;
        }
    }
}

async fn handle<C: CompletionClient>(
    chat: &mut ChatController<C, TerminalView<Stdout>>,
    input: Input,
) -> Result<()> {
    match input {
        Input::Message(text) => {
            chat.submit(&text).await?;
        }
        Input::New => {
            chat.new_conversation()?;
            chat.view_mut().notice("Started a new conversation.")?;
        }
        Input::History => print_history(chat)?,
        Input::Open(key) => chat.select(&key)?,
        Input::Delete(key) => {
            chat.delete(&key)?;
            print_history(chat)?;
        }
        Input::Title(title) => chat.rename(&title)?,
        Input::Help => chat.view_mut().notice(HELP)?,
        Input::Quit => {}
    }
    Ok(())
}

fn print_history<C: CompletionClient>(
    chat: &mut ChatController<C, TerminalView<Stdout>>,
) -> Result<()> {
    let store = chat.store();
    let entries = history_entries(store.conversations(), &store.active().id);
    chat.view_mut().print_history(&entries)?;
    Ok(())
}

/// Parse a line of input. Blank lines yield `None`.
fn parse_input(line: &str) -> Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix('/') else {
        return Ok(Some(Input::Message(line.to_string())));
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    let require = |what: &str| {
        if arg.is_empty() {
            Err(Error::InvalidInput(format!("/{name} needs {what}")))
        } else {
            Ok(arg.to_string())
        }
    };

    let input = match name {
        "new" => Input::New,
        "history" | "list" => Input::History,
        "open" => Input::Open(require("a conversation number or id")?),
        "delete" => Input::Delete(require("a conversation number or id")?),
        "title" => Input::Title(require("a title")?),
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(Error::InvalidInput(format!("unknown command: /{other}"))),
    };
    Ok(Some(input))
}
