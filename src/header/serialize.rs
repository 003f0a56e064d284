//! serde support: a header is a plain string map.
//!
//! UTF-8 fields serialize as strings and the rest as byte sequences, so a
//! format with string-only map keys (JSON) rejects a non-UTF-8 key.
//! Deserialization goes through [`Header::insert`], so a duplicated key keeps
//! its first value exactly as the wire parser does.

use std::fmt;
use std::str;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Header;

/// One key or value on the way out.
struct FieldRef<'a>(&'a [u8]);

impl Serialize for FieldRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match str::from_utf8(self.0) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(self.0),
        }
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&FieldRef(key), &FieldRef(value))?;
        }
        map.end()
    }
}

/// One key or value on the way in.
struct FieldBuf(Vec<u8>);

impl<'de> Deserialize<'de> for FieldBuf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = FieldBuf;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a byte sequence")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldBuf, E> {
                Ok(FieldBuf(v.as_bytes().to_vec()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FieldBuf, E> {
                Ok(FieldBuf(v.into_bytes()))
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<FieldBuf, E> {
                Ok(FieldBuf(v.to_vec()))
            }

            fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<FieldBuf, E> {
                Ok(FieldBuf(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FieldBuf, A::Error> {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Ok(FieldBuf(bytes))
            }
        }

        deserializer.deserialize_byte_buf(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for Header {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderVisitor;

        impl<'de> Visitor<'de> for HeaderVisitor {
            type Value = Header;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Header, A::Error> {
                let mut header = Header::new();
                while let Some((FieldBuf(key), FieldBuf(value))) = map.next_entry()? {
                    header.insert(key, value);
                }
                Ok(header)
            }
        }

        deserializer.deserialize_map(HeaderVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_fields_are_strings() {
        let header: Header = [("command", "stop"), ("node", "[0,1]")].into_iter().collect();
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"command":"stop","node":"[0,1]"}"#);
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let header: Header = serde_json::from_str(r#"{"a":"1","b":"2","a":"3"}"#).unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(header.get("a"), Some("1"));
    }

    #[test]
    fn test_non_utf8_value_roundtrip() {
        let mut header = Header::new();
        header.set("name", b"caf\xe9".as_slice());

        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"name":[99,97,102,233]}"#);

        let back: Header = serde_json::from_str(&json).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn test_rejects_non_map() {
        assert!(serde_json::from_str::<Header>(r#"["a","b"]"#).is_err());
        assert!(serde_json::from_str::<Header>(r#"{"a":1}"#).is_err());
    }
}
