//! Codec module - header wire format encoding and decoding.
//!
//! The wire format is a restricted JSON object whose keys and values are
//! always strings:
//!
//! ```text
//! {"command":"partition","node":"[0,2]","parameter.seed":"7"}
//! ```
//!
//! This module provides:
//!
//! - [`encode`] / [`encode_into`] - serialize to `bytes::Bytes` / `BytesMut`
//! - [`decode`] / [`read_header`] / [`read_header_async`] - parse one header
//!   from a slice or a stream
//! - [`write_header`] / [`write_header_async`] - serialize onto a stream
//! - [`Parser`] - the byte-at-a-time state machine the readers drive
//! - [`HeaderBuffer`] - accumulate fragmented input into complete headers
//!
//! # Escapes
//!
//! The encoder escapes `"`, `\` and every byte below `0x20`. The decoder
//! accepts `\" \\ \b \f \n \r \t` and `\u00XX`; see [`EscapeMode`] for how
//! the letter escapes are decoded.
//!
//! # Example
//!
//! ```
//! use ptp_header::codec::{decode, encode};
//! use ptp_header::Header;
//!
//! let mut header = Header::new();
//! header.set("command", "inject");
//! header.set("name", "worker \"a\"");
//!
//! let wire = encode(&header);
//! assert_eq!(decode(&wire).unwrap(), header);
//! ```

mod buffer;
mod encode;
mod options;
mod parser;
mod stream;

pub use buffer::HeaderBuffer;
pub use encode::{encode, encode_into};
pub use options::{EscapeMode, ParseOptions, DEFAULT_MAX_FIELD_LEN};
pub use parser::Parser;
pub use stream::{
    decode, decode_with, read_header, read_header_async, read_header_async_with, read_header_with,
    write_header, write_header_async,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use proptest::prelude::*;

    /// Field bytes excluding the five bytes written as letter escapes.
    fn wire_safe_bytes() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            any::<u8>().prop_filter("letter-escaped byte", |b| {
                !matches!(*b, 0x08 | 0x09 | 0x0a | 0x0c | 0x0d)
            }),
            0..12,
        )
    }

    fn any_bytes() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(any::<u8>(), 0..12)
    }

    proptest! {
        #[test]
        fn roundtrip_default_mode(pairs in proptest::collection::vec((wire_safe_bytes(), wire_safe_bytes()), 0..8)) {
            let header: Header = pairs.into_iter().collect();
            let decoded = decode(&encode(&header)).unwrap();
            prop_assert_eq!(decoded, header);
        }

        #[test]
        fn roundtrip_control_mode(pairs in proptest::collection::vec((any_bytes(), any_bytes()), 0..8)) {
            let header: Header = pairs.into_iter().collect();
            let options = ParseOptions::new().with_escape_mode(EscapeMode::Control);
            let decoded = decode_with(&encode(&header), options).unwrap();
            prop_assert_eq!(decoded, header);
        }
    }

    #[test]
    fn test_high_bytes_roundtrip() {
        let header = decode(br#"{"v":"\u00ff\u00e9"}"#).unwrap();
        assert_eq!(header.get_bytes("v"), Some([0xffu8, 0xe9].as_slice()));
        assert_eq!(decode(&encode(&header)).unwrap(), header);
    }

    #[test]
    fn test_letter_escape_asymmetry() {
        let mut header = Header::new();
        header.set("v", "a\tb\"c\u{2}");

        let wire = encode(&header);
        assert_eq!(&wire[..], br#"{"v":"a\tb\"c\u0002"}"#);

        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded.get("v"), Some("atb\"c\u{2}"));
    }
}
