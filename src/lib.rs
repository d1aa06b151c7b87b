//! bookbuddy - Terminal client for the community library
//!
//! Everything stateful lives behind the remote library API: the catalog,
//! reviews, accounts, wishlists, contests, and the librarian chat model.
//! This crate is the front of house: typed API bindings, client-side
//! search and pagination, a streaming chat session, and the CLI/REPL that
//! renders it all.
//!
//! # Layout
//!
//! - [`api`]: HTTP bindings for every library endpoint
//! - [`chat`]: streaming chat session, transcript, UTF-8 chunk decoding
//! - [`catalog`]: local filtering, review sorting/pagination, review template
//! - [`repl`]: the interactive librarian chat
//! - [`cli`]: argument parsing
//! - [`config`] / [`session`]: on-disk state under `~/.bookbuddy`

pub mod api;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod errors;
pub mod repl;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use errors::{ClientError, Result};
