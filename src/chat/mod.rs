//! Streaming chat session against the library's book assistant
//!
//! Manages a strictly serialized request/response cycle: one submitted
//! query opens one streamed HTTP response, and the growing answer is
//! published to observers after every received chunk. Observers subscribe
//! to transcript snapshots through a watch channel; the session never
//! shares mutable state with a renderer.

pub mod decoder;
pub mod transport;

pub use decoder::StreamDecoder;
pub use transport::{ByteStream, ChatTransport, HttpChatTransport};

use crate::errors::{ClientError, Result};
use crate::types::{ChatMessage, Transcript};
use futures_util::StreamExt;
use std::sync::Mutex;
use tokio::sync::watch;

/// Text committed to the assistant entry when the exchange fails
pub const FETCH_ERROR_TEXT: &str = "Error: Failed to fetch response";

/// Lifecycle of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No request outstanding; submissions accepted
    Idle,
    /// Request sent, no chunk received yet
    Awaiting,
    /// Response body is being consumed
    Streaming,
}

/// Chat session owning the transcript and the in-flight state
///
/// Submissions are serialized: while one exchange is outstanding, further
/// calls to [`ChatSession::submit`] are rejected with
/// [`ClientError::RequestInFlight`] rather than interleaved.
pub struct ChatSession {
    transport: Box<dyn ChatTransport>,
    messages: Mutex<Vec<ChatMessage>>,
    state: Mutex<SessionState>,
    publisher: watch::Sender<Transcript>,
}

impl ChatSession {
    /// Create a session over the given transport with an empty transcript
    pub fn new(transport: Box<dyn ChatTransport>) -> Self {
        let (publisher, _) = watch::channel(Transcript::from(Vec::new()));
        ChatSession {
            transport,
            messages: Mutex::new(Vec::new()),
            state: Mutex::new(SessionState::Idle),
            publisher,
        }
    }

    /// Subscribe to transcript snapshots
    ///
    /// The receiver observes a new snapshot after every appended message and
    /// after every streamed chunk.
    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.publisher.subscribe()
    }

    /// Current transcript snapshot
    pub fn transcript(&self) -> Transcript {
        self.snapshot()
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of messages in the transcript
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard the transcript (only when no exchange is outstanding)
    pub fn reset(&self) -> Result<()> {
        if self.state() != SessionState::Idle {
            return Err(ClientError::RequestInFlight);
        }
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.publish();
        Ok(())
    }

    /// Submit one query and stream the reply into the transcript
    ///
    /// Appends the user message and an empty assistant placeholder, then
    /// replaces the placeholder with the cumulative decoded text after every
    /// received chunk. Transport failures are not returned: they commit
    /// [`FETCH_ERROR_TEXT`] as the assistant reply. `Err` is only produced
    /// for the two preconditions (empty query, exchange already in flight),
    /// in which case the transcript is untouched and no request is issued.
    pub async fn submit(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        self.begin()?;

        // The user entry keeps the literal query text, untrimmed.
        self.append(ChatMessage::user(query));
        self.append(ChatMessage::assistant(""));

        let mut stream = match self.transport.open(query).await {
            Ok(stream) => stream,
            Err(_) => {
                self.finish(Some(FETCH_ERROR_TEXT));
                return Ok(());
            }
        };

        let mut decoder = StreamDecoder::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    self.set_state(SessionState::Streaming);
                    let text = decoder.feed(&bytes).to_string();
                    self.replace_last(text);
                }
                Err(_) => {
                    self.finish(Some(FETCH_ERROR_TEXT));
                    return Ok(());
                }
            }
        }

        let final_text = decoder.finish().to_string();
        self.replace_last(final_text);
        self.finish(None);
        Ok(())
    }

    /// Transition Idle -> Awaiting, rejecting concurrent submissions
    fn begin(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != SessionState::Idle {
            return Err(ClientError::RequestInFlight);
        }
        *state = SessionState::Awaiting;
        Ok(())
    }

    /// Return to Idle, optionally committing error text to the last entry
    fn finish(&self, error_text: Option<&str>) {
        if let Some(text) = error_text {
            // Replace the in-progress assistant entry rather than appending
            // a second one; one exchange produces exactly two messages.
            self.replace_last(text.to_string());
        }
        self.set_state(SessionState::Idle);
    }

    fn set_state(&self, next: SessionState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    fn append(&self, message: ChatMessage) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
        self.publish();
    }

    /// Install a new snapshot for the last transcript entry
    fn replace_last(&self, text: String) {
        {
            let mut messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(last) = messages.last_mut() {
                *last = ChatMessage {
                    origin: last.origin,
                    text,
                };
            }
        }
        self.publish();
    }

    fn snapshot(&self) -> Transcript {
        let messages = self.messages.lock().unwrap_or_else(|e| e.into_inner());
        Transcript::from(messages.as_slice())
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let _ = self.publisher.send(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Origin;
    use async_trait::async_trait;
    use bytes::Bytes;

    struct NeverCalled;

    #[async_trait]
    impl ChatTransport for NeverCalled {
        async fn open(&self, _query: &str) -> Result<ByteStream> {
            panic!("transport must not be opened for rejected submissions");
        }
    }

    struct SingleChunk;

    #[async_trait]
    impl ChatTransport for SingleChunk {
        async fn open(&self, _query: &str) -> Result<ByteStream> {
            let chunks = vec![Ok(Bytes::from_static(b"hello"))];
            Ok(Box::pin(futures_util::stream::iter(chunks)))
        }
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_side_effects() {
        let session = ChatSession::new(Box::new(NeverCalled));
        let err = session.submit("   \n").await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyQuery));
        assert!(session.is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_assistant() {
        let session = ChatSession::new(Box::new(SingleChunk));
        session.submit("  padded query ").await.unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].origin, Origin::User);
        // Literal query text, untrimmed.
        assert_eq!(transcript[0].text, "  padded query ");
        assert_eq!(transcript[1].origin, Origin::Assistant);
        assert_eq!(transcript[1].text, "hello");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_reset_clears_transcript() {
        let session = ChatSession::new(Box::new(SingleChunk));
        session.submit("q").await.unwrap();
        assert_eq!(session.len(), 2);

        session.reset().unwrap();
        assert!(session.is_empty());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_sees_final_snapshot() {
        let session = ChatSession::new(Box::new(SingleChunk));
        let receiver = session.subscribe();
        session.submit("q").await.unwrap();

        let transcript = receiver.borrow().clone();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].text, "hello");
    }
}
