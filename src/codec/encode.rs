//! Header serialization.
//!
//! Output is `{"key":"value",...}` with entries in key order and no
//! whitespace. Only `"`, `\` and bytes `0x00..=0x1f` are escaped; every other
//! byte is copied through unchanged.

use bytes::{BufMut, Bytes, BytesMut};

use crate::header::Header;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Serialize a header to its wire text.
///
/// # Example
///
/// ```
/// use ptp_header::{codec, Header};
///
/// let mut header = Header::new();
/// header.set("name", "a\tb");
/// assert_eq!(&codec::encode(&header)[..], br#"{"name":"a\tb"}"#);
/// ```
pub fn encode(header: &Header) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len_hint(header));
    encode_into(header, &mut buf);
    buf.freeze()
}

/// Serialize a header, appending to an existing buffer.
pub fn encode_into(header: &Header, buf: &mut BytesMut) {
    buf.reserve(encoded_len_hint(header));
    buf.put_u8(b'{');
    for (i, (key, value)) in header.iter().enumerate() {
        if i > 0 {
            buf.put_u8(b',');
        }
        put_field(buf, key);
        buf.put_u8(b':');
        put_field(buf, value);
    }
    buf.put_u8(b'}');
}

/// Lower bound on the encoded size, assuming nothing needs escaping.
fn encoded_len_hint(header: &Header) -> usize {
    2 + header
        .iter()
        .map(|(k, v)| k.len() + v.len() + 6)
        .sum::<usize>()
}

/// Write one quoted, escaped field.
fn put_field(buf: &mut BytesMut, field: &[u8]) {
    buf.put_u8(b'"');
    for &byte in field {
        match byte {
            b'"' => buf.put_slice(b"\\\""),
            b'\\' => buf.put_slice(b"\\\\"),
            0x08 => buf.put_slice(b"\\b"),
            0x0c => buf.put_slice(b"\\f"),
            b'\n' => buf.put_slice(b"\\n"),
            b'\r' => buf.put_slice(b"\\r"),
            b'\t' => buf.put_slice(b"\\t"),
            0x00..=0x1f => {
                buf.put_slice(b"\\u00");
                buf.put_u8(HEX_DIGITS[usize::from(byte >> 4)]);
                buf.put_u8(HEX_DIGITS[usize::from(byte & 0x0f)]);
            }
            _ => buf.put_u8(byte),
        }
    }
    buf.put_u8(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_str(header: &Header) -> String {
        String::from_utf8(encode(header).to_vec()).unwrap()
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(encode_str(&Header::new()), "{}");
    }

    #[test]
    fn test_entries_in_key_order() {
        let mut header = Header::new();
        header.set("seed", "7");
        header.set("command", "solve");
        header.set("node", "[0,2]");
        assert_eq!(
            encode_str(&header),
            r#"{"command":"solve","node":"[0,2]","seed":"7"}"#
        );
    }

    #[test]
    fn test_escapes() {
        let mut header = Header::new();
        header.set("v", "\t\"\u{2}");
        assert_eq!(encode_str(&header), r#"{"v":"\t\"\u0002"}"#);

        header.set("v", "\u{8}\u{c}\n\r\\");
        assert_eq!(encode_str(&header), r#"{"v":"\b\f\n\r\\"}"#);
    }

    #[test]
    fn test_hex_escape_is_lowercase() {
        let mut header = Header::new();
        header.set("v", "\u{1b}\u{1f}\u{0}");
        assert_eq!(encode_str(&header), r#"{"v":"\u001b\u001f\u0000"}"#);
    }

    #[test]
    fn test_keys_are_escaped_too() {
        let mut header = Header::new();
        header.set("a\"b", "");
        assert_eq!(encode_str(&header), r#"{"a\"b":""}"#);
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let mut header = Header::new();
        header.set("name", "café/λ");
        assert_eq!(encode_str(&header), "{\"name\":\"café/λ\"}");
    }

    #[test]
    fn test_high_bytes_pass_through() {
        let mut header = Header::new();
        header.set("name", b"caf\xe9\xff".as_slice());
        assert_eq!(&encode(&header)[..], b"{\"name\":\"caf\xe9\xff\"}");
    }

    #[test]
    fn test_encode_into_appends() {
        let mut header = Header::new();
        header.set("a", "1");

        let mut buf = BytesMut::from(&b"prefix "[..]);
        encode_into(&header, &mut buf);
        encode_into(&header, &mut buf);
        assert_eq!(&buf[..], br#"prefix {"a":"1"}{"a":"1"}"#);
    }

    #[test]
    fn test_output_is_json() {
        let mut header = Header::new();
        header.set("v", "\u{1}\u{8}\t\"\\ end");
        header.set("statistic.lemmas", "12");

        let json: std::collections::BTreeMap<String, String> =
            serde_json::from_slice(&encode(&header)).unwrap();
        assert_eq!(json.len(), 2);
        assert_eq!(json["v"], "\u{1}\u{8}\t\"\\ end");
        assert_eq!(json["statistic.lemmas"], "12");
    }
}
