//! Terminal output for the chat REPL
//!
//! Color-coded transcript rendering plus a spinner for the gap between
//! submitting a query and the first streamed chunk.

use crate::types::{ChatMessage, Origin};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Display manager for the chat REPL
pub struct DisplayManager;

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, username: &str, base_url: &str) {
        let width = 64;
        println!("\n{}", "=".repeat(width).cyan());
        println!(
            "{}",
            format!("  bookbuddy {} - Book Chat", version).bold().cyan()
        );
        println!(
            "{}",
            format!("  Signed in as: {} | API: {}", username, base_url).dimmed()
        );
        println!("{}\n", "=".repeat(width).cyan());
        println!(
            "Ask the librarian about the catalog (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Prefix printed before a streaming assistant reply
    pub fn show_assistant_prefix(&self) {
        print!("{} ", "librarian>".cyan().bold());
        let _ = io::stdout().flush();
    }

    /// Print a fragment of the streaming reply in place
    pub fn stream_text(&self, fragment: &str) {
        print!("{}", fragment);
        let _ = io::stdout().flush();
    }

    /// Spinner shown while no chunk has arrived yet
    pub fn start_waiting(&self) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Waiting for the librarian...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Render one finished transcript entry
    pub fn show_message(&self, message: &ChatMessage) {
        match message.origin {
            Origin::User => println!("{} {}", "you>".green().bold(), message.text),
            Origin::Assistant => println!("{} {}", "librarian>".cyan().bold(), message.text),
        }
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
