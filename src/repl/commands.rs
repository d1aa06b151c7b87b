//! Built-in slash commands for the chat REPL

use crate::chat::ChatSession;
use crate::errors::Result;
use colored::*;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Reset,
    Clear,
    Exit,
    Unknown { input: String },
}

/// Check whether an input line is a slash command
pub fn is_command(input: &str) -> bool {
    input.trim_start().starts_with('/')
}

/// Parse an input line into a command
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.trim_start_matches('/').split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Command::Unknown {
            input: input.to_string(),
        };
    };

    match name.to_lowercase().as_str() {
        "help" | "h" => Command::Help,
        "status" => Command::Status,
        "reset" => Command::Reset,
        "clear" | "cls" => Command::Clear,
        "exit" | "quit" | "q" => Command::Exit,
        _ => Command::Unknown {
            input: input.to_string(),
        },
    }
}

/// Command handler for the chat REPL
pub struct CommandHandler {
    username: String,
    base_url: String,
}

impl CommandHandler {
    pub fn new(username: String, base_url: String) -> Self {
        CommandHandler { username, base_url }
    }

    /// Execute a command
    ///
    /// Returns true if the REPL should continue, false to exit
    pub fn execute(&self, command: Command, chat: &ChatSession) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Status => {
                println!("Signed in as: {}", self.username.bold());
                println!("API: {}", self.base_url);
                println!("Messages this session: {}", chat.len());
                Ok(true)
            }
            Command::Reset => {
                chat.reset()?;
                println!("{}", "Transcript cleared.".yellow());
                Ok(true)
            }
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Happy reading!".green());
                Ok(false)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(50).cyan());

        let commands = vec![
            ("/help, /h", "Show this help message"),
            ("/status", "Show session info"),
            ("/reset", "Discard the current transcript"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Leave the chat"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\nType a question directly (no / prefix) to ask the librarian.\n");
    }
}
