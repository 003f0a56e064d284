//! Header record - the attribute set carried by every protocol message.
//!
//! A [`Header`] is a flat, ordered map of byte strings. Keys are unique and
//! iteration follows lexicographic key order, which is also the order the
//! codec serializes entries in.
//!
//! Values are untyped: seeds, counters, booleans and node addresses are all
//! plain strings by convention.
//!
//! # Example
//!
//! ```
//! use ptp_header::{Header, Prefix};
//! use ptp_header::protocol::{command, param};
//!
//! let mut header = Header::new();
//! header.set(param::COMMAND, command::PARTITION);
//! header.set(param::NODE, "[0,2]");
//! header.set_prefixed(Prefix::PARAMETER, param::SEED, "42");
//!
//! assert_eq!(header.command(), Some("partition"));
//! assert_eq!(header.level(), 1);
//! assert_eq!(header.to_string(), r#"{"command":"partition","node":"[0,2]","parameter.seed":"42"}"#);
//! ```

mod node;
mod prefix;
mod serialize;

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;
use std::fmt;
use std::str::{self, FromStr};

use crate::codec;
use crate::error::ParseError;
use crate::protocol::param;

pub use node::node_level;
pub use prefix::Prefix;

/// One protocol message's attribute set.
///
/// Keys and values are byte strings: `\u00XX` escapes and raw high bytes on
/// the wire are kept exactly as received. The `&str` accessors are views for
/// entries that happen to be UTF-8, which is every entry the protocol
/// vocabulary produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Header {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the header has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value stored under `key` as text.
    ///
    /// Returns `None` when the key is absent or the value is not UTF-8; use
    /// [`Header::get_bytes`] to read any value.
    #[inline]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&str> {
        self.get_bytes(key).and_then(|value| str::from_utf8(value).ok())
    }

    /// Get the raw value stored under `key`.
    #[inline]
    pub fn get_bytes(&self, key: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.entries.get(key.as_ref()).map(Vec::as_slice)
    }

    /// Check if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    /// Insert an entry unless the key already exists.
    ///
    /// Returns `false` and keeps the existing value when `key` is taken.
    /// This is the rule the parser applies to duplicate keys.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Write an entry, overwriting any existing value.
    ///
    /// Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<Vec<u8>> {
        self.entries.remove(key.as_ref())
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over raw `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// Iterate over raw keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.entries.keys().map(Vec::as_slice)
    }

    /// Build a new header holding only the listed keys that exist here.
    ///
    /// Missing keys are skipped. Compare [`Header::copy_prefixed`], which
    /// always writes every listed key.
    pub fn copy<I, S>(&self, keys: I) -> Header
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut header = Header::new();
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = self.get_bytes(key) {
                header.set(key, value);
            }
        }
        header
    }

    /// Value of the `command` parameter.
    #[inline]
    pub fn command(&self) -> Option<&str> {
        self.get(param::COMMAND)
    }

    /// Value of the `node` parameter (the partition-tree address).
    #[inline]
    pub fn node(&self) -> Option<&str> {
        self.get(param::NODE)
    }
}

impl fmt::Display for Header {
    /// Writes the canonical wire text. Bytes that are not UTF-8 are shown as
    /// U+FFFD; [`codec::encode`] gives the exact wire bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&codec::encode(self)))
    }
}

impl FromStr for Header {
    type Err = ParseError;

    /// Parses wire text with default options.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode(s.as_bytes())
    }
}

impl<K, V> FromIterator<(K, V)> for Header
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    /// Collects pairs; on duplicate keys the first pair wins.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut header = Header::new();
        for (key, value) in iter {
            header.insert(key, value);
        }
        header
    }
}

impl IntoIterator for Header {
    type Item = (Vec<u8>, Vec<u8>);
    type IntoIter = btree_map::IntoIter<Vec<u8>, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = (&'a Vec<u8>, &'a Vec<u8>);
    type IntoIter = btree_map::Iter<'a, Vec<u8>, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
