//! Shared data types for the library client

pub mod catalog;
pub mod chat;

pub use catalog::{Book, BookSummary, Review, Winner};
pub use chat::{ChatMessage, Origin, Transcript};
