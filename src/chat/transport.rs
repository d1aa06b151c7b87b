//! Transport seam for the chat session
//!
//! The session only needs "one query in, one byte stream out"; hiding the
//! HTTP client behind a trait lets tests drive the session with scripted
//! chunk sequences.

use crate::api::LibraryClient;
use crate::errors::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use std::pin::Pin;

/// Unframed response byte stream for one chat exchange
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// One-shot streaming transport: a query maps to one response byte stream
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Issue the request for `query` and return its response body stream
    async fn open(&self, query: &str) -> Result<ByteStream>;
}

/// Production transport over the library API's `/chat` endpoint
pub struct HttpChatTransport {
    client: LibraryClient,
}

impl HttpChatTransport {
    pub fn new(client: LibraryClient) -> Self {
        HttpChatTransport { client }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn open(&self, query: &str) -> Result<ByteStream> {
        self.client.chat_stream(query).await
    }
}
