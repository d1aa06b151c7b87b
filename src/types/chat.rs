//! Chat transcript types
//!
//! A transcript is an append-only sequence of message snapshots. While an
//! assistant reply is streaming, each received chunk produces a *new*
//! snapshot for the last entry; observers always see a consistent,
//! immutable transcript reference.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who produced a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    User,
    Assistant,
}

/// One entry in a chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub origin: Origin,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            origin: Origin::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ChatMessage {
            origin: Origin::Assistant,
            text: text.into(),
        }
    }
}

/// Immutable transcript snapshot shared with observers
pub type Transcript = Arc<[ChatMessage]>;
