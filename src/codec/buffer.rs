//! Header buffer for accumulating partial reads.
//!
//! Input arrives in arbitrary chunks (pipe reads, socket segments). The
//! buffer keeps a resumable [`Parser`] between pushes, so a header split
//! across any number of chunks is returned as soon as its closing `}` is seen.
//!
//! Bytes between headers are skipped, exactly like the bytes before the
//! first `{`.
//!
//! A syntax error stops the push at the offending byte. Headers completed
//! earlier and the unread rest of the chunk stay in the buffer, and the next
//! [`HeaderBuffer::push`] or [`HeaderBuffer::drain`] delivers them first.
//!
//! # Example
//!
//! ```
//! use ptp_header::codec::HeaderBuffer;
//!
//! let mut buffer = HeaderBuffer::new();
//!
//! assert!(buffer.push(br#"{"command":"sto"#).unwrap().is_empty());
//! let headers = buffer.push(br#"p"}{"command":"resume"}"#).unwrap();
//!
//! assert_eq!(headers.len(), 2);
//! assert_eq!(headers[0].command(), Some("stop"));
//! assert_eq!(headers[1].command(), Some("resume"));
//! ```

use std::mem;

use bytes::{Buf, BytesMut};

use crate::error::Result;
use crate::header::Header;

use super::options::ParseOptions;
use super::parser::Parser;

/// Buffer for turning incoming chunks into complete headers.
#[derive(Debug, Clone, Default)]
pub struct HeaderBuffer {
    /// Parser carrying partial state across pushes.
    parser: Parser,
    /// Input not yet fed to the parser (non-empty only after an error).
    unread: BytesMut,
    /// Headers completed but not yet returned.
    ready: Vec<Header>,
}

impl HeaderBuffer {
    /// Create a new header buffer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new header buffer with custom parse options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            parser: Parser::with_options(options),
            ..Self::default()
        }
    }

    /// Push data into the buffer and extract all complete headers.
    ///
    /// Returns headers in arrival order, including any held back by an
    /// earlier error; the vector is empty if no header is ready.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error. The partial header is dropped and
    /// parsing stops right after the offending byte. Headers completed before
    /// the error and the rest of the input are kept for the next call.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Header>> {
        self.unread.extend_from_slice(data);
        self.drain()
    }

    /// Continue parsing buffered input without adding new data.
    ///
    /// Call after [`HeaderBuffer::push`] fails to collect the headers it
    /// held back. Errors are reported the same way as for `push`.
    pub fn drain(&mut self) -> Result<Vec<Header>> {
        while self.unread.has_remaining() {
            let byte = self.unread.get_u8();
            match self.parser.feed(byte) {
                Ok(Some(header)) => {
                    tracing::trace!(entries = header.len(), "Header extracted");
                    self.ready.push(header);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(
                        held = self.ready.len(),
                        unread = self.unread.len(),
                        "Header parser reset after parse error: {}",
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(mem::take(&mut self.ready))
    }

    /// Check if a header is partially parsed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.parser.is_pending()
    }

    /// Check if input or completed headers are held back by an error.
    #[inline]
    pub fn has_buffered(&self) -> bool {
        !self.unread.is_empty() || !self.ready.is_empty()
    }

    /// Drop any partial header, unread input and held-back headers.
    pub fn clear(&mut self) {
        self.parser.reset();
        self.unread.clear();
        self.ready.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, EscapeMode};
    use crate::error::ParseError;

    /// Helper to build the wire bytes of a header.
    fn make_header_bytes(pairs: &[(&str, &str)]) -> Vec<u8> {
        let header: Header = pairs.iter().copied().collect();
        encode(&header).to_vec()
    }

    #[test]
    fn test_single_complete_header() {
        let mut buffer = HeaderBuffer::new();
        let bytes = make_header_bytes(&[("command", "solve"), ("seed", "3")]);

        let headers = buffer.push(&bytes).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].command(), Some("solve"));
        assert_eq!(headers[0].get("seed"), Some("3"));
        assert!(!buffer.is_pending());
    }

    #[test]
    fn test_multiple_headers_in_one_push() {
        let mut buffer = HeaderBuffer::new();

        let mut combined = Vec::new();
        combined.extend(make_header_bytes(&[("n", "1")]));
        combined.extend(make_header_bytes(&[("n", "2")]));
        combined.extend(make_header_bytes(&[("n", "3")]));

        let headers = buffer.push(&combined).unwrap();

        assert_eq!(headers.len(), 3);
        for (i, header) in headers.iter().enumerate() {
            assert_eq!(header.get("n"), Some((i + 1).to_string().as_str()));
        }
    }

    #[test]
    fn test_fragmented_header() {
        let mut buffer = HeaderBuffer::new();
        let bytes = make_header_bytes(&[("command", "partition"), ("partitions", "4")]);

        let headers = buffer.push(&bytes[..10]).unwrap();
        assert!(headers.is_empty());
        assert!(buffer.is_pending());

        let headers = buffer.push(&bytes[10..]).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].get("partitions"), Some("4"));
        assert!(!buffer.is_pending());
    }

    #[test]
    fn test_split_inside_escape() {
        let mut buffer = HeaderBuffer::new();
        let bytes = br#"{"v":"\u0041"}"#;

        assert!(buffer.push(&bytes[..8]).unwrap().is_empty());
        assert!(buffer.push(&bytes[8..10]).unwrap().is_empty());
        let headers = buffer.push(&bytes[10..]).unwrap();
        assert_eq!(headers[0].get("v"), Some("A"));
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buffer = HeaderBuffer::new();
        let bytes = make_header_bytes(&[("name", "q\"1\""), ("node", "[0,2][1,2]")]);

        let mut all_headers = Vec::new();
        for byte in &bytes {
            all_headers.extend(buffer.push(&[*byte]).unwrap());
        }

        assert_eq!(all_headers.len(), 1);
        assert_eq!(all_headers[0].get("name"), Some("q\"1\""));
        assert_eq!(all_headers[0].level(), 2);
    }

    #[test]
    fn test_mixed_complete_and_partial() {
        let mut buffer = HeaderBuffer::new();

        let first = make_header_bytes(&[("n", "1")]);
        let second = make_header_bytes(&[("n", "2")]);

        let mut data = first.clone();
        data.extend_from_slice(&second[..5]);

        let headers = buffer.push(&data).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].get("n"), Some("1"));
        assert!(buffer.is_pending());

        let headers = buffer.push(&second[5..]).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].get("n"), Some("2"));
    }

    #[test]
    fn test_noise_between_headers_is_skipped() {
        let mut buffer = HeaderBuffer::new();
        let headers = buffer
            .push(b"log line\n{\"n\":\"1\"}\r\nmore noise {\"n\":\"2\"}")
            .unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].get("n"), Some("2"));
    }

    #[test]
    fn test_error_resets_buffer() {
        let mut buffer = HeaderBuffer::new();

        buffer.push(br#"{"a":"#).unwrap();
        assert!(buffer.is_pending());

        let result = buffer.push(br#"1}"#);
        assert_eq!(result, Err(ParseError::DoubleQuotesExpected));
        assert!(!buffer.is_pending());

        let headers = buffer.push(br#"{"b":"2"}"#).unwrap();
        assert_eq!(headers.len(), 1);
        assert!(!headers[0].contains_key("a"));
        assert!(!buffer.has_buffered());
    }

    #[test]
    fn test_error_keeps_completed_headers() {
        let mut buffer = HeaderBuffer::new();

        let result = buffer.push(br#"{"command":"stop"}{bad"#);
        assert_eq!(result, Err(ParseError::DoubleQuotesExpected));
        assert!(buffer.has_buffered());

        let headers = buffer.drain().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].command(), Some("stop"));
        assert!(!buffer.has_buffered());
    }

    #[test]
    fn test_error_keeps_rest_of_chunk() {
        let mut buffer = HeaderBuffer::new();

        let result = buffer.push(br#"{"n":"1"}{"x":2}{"n":"3"}"#);
        assert_eq!(result, Err(ParseError::DoubleQuotesExpected));

        let headers = buffer.push(br#"{"n":"4"}"#).unwrap();
        let values: Vec<_> = headers.iter().map(|h| h.get("n")).collect();
        assert_eq!(values, vec![Some("1"), Some("3"), Some("4")]);
    }

    #[test]
    fn test_clear_drops_held_back_headers() {
        let mut buffer = HeaderBuffer::new();

        assert!(buffer.push(br#"{"n":"1"}{x{"n":"2"}"#).is_err());
        buffer.clear();

        assert!(!buffer.has_buffered());
        assert!(buffer.drain().unwrap().is_empty());
    }

    #[test]
    fn test_clear_resets_state() {
        let mut buffer = HeaderBuffer::new();

        buffer.push(br#"{"a":"1","b"#).unwrap();
        assert!(buffer.is_pending());

        buffer.clear();
        assert!(!buffer.is_pending());

        let headers = buffer.push(br#""c":"3"}{"d":"4"}"#).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].get("d"), Some("4"));
    }

    #[test]
    fn test_with_options() {
        let options = ParseOptions::new().with_escape_mode(EscapeMode::Control);
        let mut buffer = HeaderBuffer::with_options(options);
        let headers = buffer.push(br#"{"v":"a\tb"}"#).unwrap();
        assert_eq!(headers[0].get("v"), Some("a\tb"));
    }
}
