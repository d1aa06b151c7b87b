//! Interactive chat REPL
//!
//! Reads queries with rustyline, routes slash commands, and renders the
//! assistant's reply progressively: a watcher task subscribes to transcript
//! snapshots and prints each new fragment as it is published, while the
//! submit call drives the stream. Submission is naturally serialized — the
//! REPL awaits each exchange before prompting again.

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Command, CommandHandler};
pub use display::DisplayManager;
pub use input::InputHandler;

use crate::chat::ChatSession;
use crate::config::Config;
use crate::types::Origin;
use anyhow::Result;
use colored::*;
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Tracks how much of the in-progress reply has been printed
#[derive(Default)]
struct PrintedState {
    text: String,
}

impl PrintedState {
    /// Compute what to print for the transition to `current`
    ///
    /// The streaming reply only ever grows, so the printed text is normally
    /// a prefix of `current`. A wholesale replacement (the error path)
    /// restarts on a fresh line.
    fn advance(&mut self, current: &str) -> Option<String> {
        if current == self.text {
            return None;
        }
        let out = match current.strip_prefix(self.text.as_str()) {
            Some(delta) => delta.to_string(),
            None => format!("\n{}", current),
        };
        self.text = current.to_string();
        Some(out)
    }
}

fn emit_delta(state: &Mutex<PrintedState>, spinner: &ProgressBar, current: &str) {
    if current.is_empty() {
        return;
    }
    let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
    let first = state.text.is_empty();
    let Some(delta) = state.advance(current) else {
        return;
    };
    if first {
        spinner.finish_and_clear();
        print!("{} ", "librarian>".cyan().bold());
    }
    print!("{}", delta);
    let _ = io::stdout().flush();
}

/// Chat REPL coordinator
pub struct ChatRepl {
    input: InputHandler,
    display: DisplayManager,
    commands: CommandHandler,
    chat: Arc<ChatSession>,
}

impl ChatRepl {
    /// Create a REPL with history persisted under the bookbuddy data dir
    pub fn new(chat: Arc<ChatSession>, username: String, base_url: String) -> Result<Self> {
        let input = match Config::data_dir() {
            Ok(dir) => InputHandler::with_history(dir.join("history"))?,
            Err(_) => InputHandler::new()?,
        };

        Ok(ChatRepl {
            input,
            display: DisplayManager::new(),
            commands: CommandHandler::new(username, base_url),
            chat,
        })
    }

    /// Show the welcome banner
    pub fn show_welcome(&self, version: &str, username: &str, base_url: &str) {
        self.display.show_banner(version, username, base_url);
    }

    /// Run the read-eval-print loop until exit
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let line = match self.input.read_line() {
                Ok(Some(line)) => line,
                // EOF or Ctrl-C both leave the chat.
                Ok(None) | Err(_) => break,
            };
            if line.is_empty() {
                continue;
            }

            if commands::is_command(&line) {
                let command = commands::parse(&line);
                if !self.commands.execute(command, &self.chat)? {
                    break;
                }
                continue;
            }

            self.exchange(&line).await;
        }

        self.input.save_history()?;
        Ok(())
    }

    /// Run one query/reply exchange with progressive rendering
    async fn exchange(&mut self, query: &str) {
        let spinner = self.display.start_waiting();
        let printed = Arc::new(Mutex::new(PrintedState::default()));

        let watcher = {
            let printed = Arc::clone(&printed);
            let spinner = spinner.clone();
            let mut receiver = self.chat.subscribe();
            tokio::spawn(async move {
                while receiver.changed().await.is_ok() {
                    let text = {
                        let snapshot = receiver.borrow_and_update();
                        match snapshot.last() {
                            Some(m) if m.origin == Origin::Assistant => Some(m.text.clone()),
                            _ => None,
                        }
                    };
                    if let Some(text) = text {
                        emit_delta(&printed, &spinner, &text);
                    }
                }
            })
        };

        let result = self.chat.submit(query).await;
        watcher.abort();

        // Flush whatever the watcher did not get to before it stopped.
        let transcript = self.chat.transcript();
        if let Some(message) = transcript.last() {
            if message.origin == Origin::Assistant {
                emit_delta(&printed, &spinner, &message.text);
            }
        }
        spinner.finish_and_clear();

        let nothing_printed = printed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .text
            .is_empty();
        if nothing_printed {
            self.display.show_assistant_prefix();
        }
        println!();

        if let Err(e) = result {
            self.display.show_error(&e.to_string());
        }
    }
}
