//! Integration tests for the streaming chat session
//!
//! Drive the session through scripted transports and check the transcript
//! contract: one user entry plus one assistant entry per accepted
//! submission, chunk-segmentation-independent final text, and the fixed
//! error text on transport failure.

use async_trait::async_trait;
use bookbuddy::chat::{
    ByteStream, ChatSession, ChatTransport, SessionState, FETCH_ERROR_TEXT,
};
use bookbuddy::errors::{ClientError, Result};
use bookbuddy::types::Origin;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Transport replaying a fixed chunk script, optionally ending in an error
struct ScriptedTransport {
    chunks: Vec<Vec<u8>>,
    fail_at_end: bool,
}

impl ScriptedTransport {
    fn chunks(chunks: &[&[u8]]) -> Self {
        ScriptedTransport {
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            fail_at_end: false,
        }
    }

    fn failing_after(chunks: &[&[u8]]) -> Self {
        ScriptedTransport {
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            fail_at_end: true,
        }
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn open(&self, _query: &str) -> Result<ByteStream> {
        let mut items: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|c| Ok(Bytes::from(c.clone())))
            .collect();
        if self.fail_at_end {
            items.push(Err(ClientError::Streaming("connection reset".to_string())));
        }
        Ok(Box::pin(futures_util::stream::iter(items)))
    }
}

/// Transport whose open() always fails
struct BrokenTransport;

#[async_trait]
impl ChatTransport for BrokenTransport {
    async fn open(&self, _query: &str) -> Result<ByteStream> {
        Err(ClientError::Streaming("refused".to_string()))
    }
}

/// Transport counting how many requests were issued
struct CountingTransport {
    opened: Arc<AtomicUsize>,
}

#[async_trait]
impl ChatTransport for CountingTransport {
    async fn open(&self, _query: &str) -> Result<ByteStream> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::pin(futures_util::stream::iter(Vec::<Result<Bytes>>::new())))
    }
}

/// Transport that parks until released, to hold an exchange in flight
struct GatedTransport {
    release: Arc<Notify>,
}

#[async_trait]
impl ChatTransport for GatedTransport {
    async fn open(&self, _query: &str) -> Result<ByteStream> {
        self.release.notified().await;
        let items: Vec<Result<Bytes>> = vec![Ok(Bytes::from_static(b"done"))];
        Ok(Box::pin(futures_util::stream::iter(items)))
    }
}

fn assistant_text(session: &ChatSession) -> String {
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2, "one exchange must produce two entries");
    assert_eq!(transcript[0].origin, Origin::User);
    assert_eq!(transcript[1].origin, Origin::Assistant);
    transcript[1].text.clone()
}

#[tokio::test]
async fn test_three_chunk_reply_accumulates() {
    let transport = ScriptedTransport::chunks(&[
        b"We have ",
        b"The Hound of the Baske",
        b"rvilles.",
    ]);
    let session = ChatSession::new(Box::new(transport));

    session.submit("do you have any Sherlock Holmes?").await.unwrap();

    assert_eq!(
        assistant_text(&session),
        "We have The Hound of the Baskervilles."
    );
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_multibyte_chars_split_across_chunks() {
    // "Les Misérables 📚" with the é and the emoji each torn across chunks.
    let full = "Les Misérables \u{1F4DA}".as_bytes();
    let transport = ScriptedTransport::chunks(&[&full[..8], &full[8..17], &full[17..]]);
    let session = ChatSession::new(Box::new(transport));

    session.submit("french classics?").await.unwrap();

    assert_eq!(assistant_text(&session), "Les Misérables \u{1F4DA}");
}

#[tokio::test]
async fn test_empty_stream_yields_empty_reply() {
    let transport = ScriptedTransport::chunks(&[]);
    let session = ChatSession::new(Box::new(transport));

    session.submit("anything?").await.unwrap();

    assert_eq!(assistant_text(&session), "");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_failed_request_commits_error_text() {
    let session = ChatSession::new(Box::new(BrokenTransport));

    session.submit("hello?").await.unwrap();

    assert_eq!(assistant_text(&session), FETCH_ERROR_TEXT);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_midstream_failure_replaces_partial_reply() {
    let transport = ScriptedTransport::failing_after(&[b"We have plenty of "]);
    let session = ChatSession::new(Box::new(transport));

    session.submit("mysteries?").await.unwrap();

    // The partial text is replaced, not followed by a second entry.
    assert_eq!(assistant_text(&session), FETCH_ERROR_TEXT);
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_whitespace_query_issues_no_request() {
    let opened = Arc::new(AtomicUsize::new(0));
    let transport = CountingTransport {
        opened: Arc::clone(&opened),
    };
    let session = ChatSession::new(Box::new(transport));

    for query in ["", "   ", "\t\n"] {
        let err = session.submit(query).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyQuery));
    }

    assert_eq!(opened.load(Ordering::SeqCst), 0);
    assert!(session.is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_submission_rejected_while_in_flight() {
    let release = Arc::new(Notify::new());
    let transport = GatedTransport {
        release: Arc::clone(&release),
    };
    let session = Arc::new(ChatSession::new(Box::new(transport)));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("first question").await })
    };

    // Let the first submission reach the transport.
    while session.state() == SessionState::Idle {
        tokio::task::yield_now().await;
    }

    let err = session.submit("second question").await.unwrap_err();
    assert!(matches!(err, ClientError::RequestInFlight));
    // The rejected submission left no trace.
    assert_eq!(session.len(), 2);

    release.notify_one();
    first.await.unwrap().unwrap();

    assert_eq!(assistant_text(&session), "done");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_observed_snapshots_grow_monotonically() {
    let transport = ScriptedTransport::chunks(&[b"one ", b"two ", b"three"]);
    let session = ChatSession::new(Box::new(transport));

    let mut receiver = session.subscribe();
    let collector = tokio::spawn(async move {
        let mut seen: Vec<String> = Vec::new();
        while receiver.changed().await.is_ok() {
            let snapshot = receiver.borrow_and_update().clone();
            if let Some(last) = snapshot.last() {
                if last.origin == Origin::Assistant {
                    seen.push(last.text.clone());
                }
            }
        }
        seen
    });

    session.submit("count?").await.unwrap();
    drop(session);

    let seen = collector.await.unwrap();
    assert!(!seen.is_empty());
    for pair in seen.windows(2) {
        assert!(
            pair[1].starts_with(&pair[0]),
            "reply shrank: {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(seen.last().map(String::as_str), Some("one two three"));
}
