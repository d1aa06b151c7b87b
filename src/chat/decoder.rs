//! Incremental UTF-8 decoder for streamed chat responses
//!
//! The transport may split the byte stream anywhere, including inside a
//! multi-byte character. Decoding is therefore stateful: an incomplete
//! trailing sequence is carried over and completed by the next chunk, and
//! the cumulative text is identical for every possible chunk segmentation.

/// Stateful UTF-8 decoder accumulating the full response text
#[derive(Debug, Default)]
pub struct StreamDecoder {
    /// Cumulative decoded text
    text: String,
    /// Incomplete trailing byte sequence from the previous chunk (0-3 bytes)
    pending: Vec<u8>,
}

impl StreamDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return the cumulative decoded text
    ///
    /// Invalid byte sequences decode to U+FFFD; an incomplete sequence at
    /// the end of the chunk is buffered until more bytes arrive.
    pub fn feed(&mut self, chunk: &[u8]) -> &str {
        self.pending.extend_from_slice(chunk);
        let input = std::mem::take(&mut self.pending);

        let mut pos = 0;
        while pos < input.len() {
            match std::str::from_utf8(&input[pos..]) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    pos = input.len();
                }
                Err(err) => {
                    let valid_end = pos + err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&input[pos..valid_end]) {
                        self.text.push_str(valid);
                    }
                    match err.error_len() {
                        // Invalid sequence in the middle of the stream.
                        Some(skip) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            pos = valid_end + skip;
                        }
                        // Possibly-valid sequence cut off at the chunk
                        // boundary; wait for the rest.
                        None => {
                            self.pending = input[valid_end..].to_vec();
                            pos = input.len();
                        }
                    }
                }
            }
        }

        &self.text
    }

    /// Signal end of stream and return the final text
    ///
    /// A sequence still incomplete when the stream ends can never be
    /// completed and decodes to a single U+FFFD.
    pub fn finish(&mut self) -> &str {
        if !self.pending.is_empty() {
            self.pending.clear();
            self.text.push(char::REPLACEMENT_CHARACTER);
        }
        &self.text
    }

    /// Cumulative text decoded so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bytes currently buffered waiting for the rest of a sequence
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_ascii_chunks() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.feed(b"We have "), "We have ");
        assert_eq!(decoder.feed(b"books."), "We have books.");
        assert_eq!(decoder.finish(), "We have books.");
    }

    #[test]
    fn test_split_inside_multibyte_character() {
        // "café" with the two-byte 'é' split across chunks
        let bytes = "café".as_bytes();
        let mut decoder = StreamDecoder::new();
        decoder.feed(&bytes[..4]);
        assert_eq!(decoder.text(), "caf");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.feed(&bytes[4..]), "café");
        assert_eq!(decoder.finish(), "café");
    }

    #[test]
    fn test_four_byte_character_one_byte_at_a_time() {
        let bytes = "📚".as_bytes();
        let mut decoder = StreamDecoder::new();
        for &b in &bytes[..3] {
            decoder.feed(&[b]);
            assert_eq!(decoder.text(), "");
        }
        decoder.feed(&[bytes[3]]);
        assert_eq!(decoder.finish(), "📚");
    }

    #[test]
    fn test_invalid_byte_mid_stream() {
        let mut decoder = StreamDecoder::new();
        decoder.feed(b"ok\xFFok");
        assert_eq!(decoder.finish(), "ok\u{FFFD}ok");
    }

    #[test]
    fn test_truncated_sequence_at_end_of_stream() {
        let mut decoder = StreamDecoder::new();
        decoder.feed(&"é".as_bytes()[..1]);
        assert_eq!(decoder.text(), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }

    #[test]
    fn test_empty_stream() {
        let mut decoder = StreamDecoder::new();
        assert_eq!(decoder.finish(), "");
    }

    #[quickcheck]
    fn prop_segmentation_invariance(text: String, cuts: Vec<u8>) -> bool {
        // Slice the encoded text at arbitrary byte offsets; the decoded
        // result must not depend on where the transport splits chunks.
        let bytes = text.as_bytes();
        let mut offsets: Vec<usize> = cuts
            .into_iter()
            .map(|c| c as usize % (bytes.len() + 1))
            .collect();
        offsets.push(0);
        offsets.push(bytes.len());
        offsets.sort_unstable();

        let mut decoder = StreamDecoder::new();
        for pair in offsets.windows(2) {
            decoder.feed(&bytes[pair[0]..pair[1]]);
        }
        decoder.finish() == text
    }
}
