//! HTTP client for the remote library API
//!
//! All persistence, authentication, review storage, contest selection, and
//! chat inference live behind the remote API; this module only constructs
//! requests and decodes responses.

pub mod account;
pub mod books;
pub mod client;
pub mod contests;
pub mod reviews;

pub use account::{AccountProfile, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
pub use client::{LibraryClient, DEFAULT_BASE_URL};
