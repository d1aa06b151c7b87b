//! Error types for the bookbuddy client
//!
//! Every fallible operation in the crate returns [`Result`]; remote API
//! failures, local persistence failures, and chat preconditions all map
//! into [`ClientError`].

use thiserror::Error;

/// Main error type for the library client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the library API
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// In-band error payload from an account endpoint
    #[error("Account error: {0}")]
    Account(String),

    /// Local input validation failures (before any request is sent)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Chat submission with an empty or whitespace-only query
    #[error("Query is empty")]
    EmptyQuery,

    /// Chat submission while a previous exchange is still streaming
    #[error("A chat request is already in flight")]
    RequestInFlight,

    /// Mid-stream failures while reading a chat response
    #[error("Streaming error: {0}")]
    Streaming(String),

    /// Operation requires a signed-in account
    #[error("Not signed in. Run `bookbuddy login` first")]
    NotSignedIn,

    /// Operation requires an administrator account
    #[error("This action requires an administrator account")]
    NotAdmin,

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
