//! `prefix.key` namespacing on top of the flat header.

use std::fmt;

use super::Header;

/// Namespace tag for composite `prefix.key` header keys.
///
/// Prefixes are known at compile time; the two the protocol uses are
/// [`Prefix::STATISTIC`] and [`Prefix::PARAMETER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    /// Statistics reported by a worker.
    pub const STATISTIC: Prefix = Prefix("statistic");
    /// Solver parameters forwarded to a worker.
    pub const PARAMETER: Prefix = Prefix("parameter");

    /// Create a custom prefix.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The bare prefix text, without the trailing dot.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Build the composite key `prefix.key`.
    pub fn key(self, key: impl AsRef<[u8]>) -> Vec<u8> {
        let key = key.as_ref();
        let mut full = Vec::with_capacity(self.0.len() + 1 + key.len());
        full.extend_from_slice(self.0.as_bytes());
        full.push(b'.');
        full.extend_from_slice(key);
        full
    }

    /// Return the suffix of `full` if it has the exact form `prefix.<suffix>`.
    fn strip(self, full: &[u8]) -> Option<&[u8]> {
        full.strip_prefix(self.0.as_bytes())?.strip_prefix(b".")
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Header {
    /// Value at `prefix.key`, or `""` when absent or not UTF-8.
    ///
    /// Absent and empty are indistinguishable here; use
    /// [`Header::get_bytes`] with [`Prefix::key`] when the difference matters.
    pub fn get_prefixed(&self, prefix: Prefix, key: impl AsRef<[u8]>) -> &str {
        self.get(prefix.key(key)).unwrap_or("")
    }

    /// Write `prefix.key`, overwriting any existing value.
    pub fn set_prefixed(
        &mut self,
        prefix: Prefix,
        key: impl AsRef<[u8]>,
        value: impl Into<Vec<u8>>,
    ) {
        self.set(prefix.key(key), value);
    }

    /// Remove `prefix.key` if present.
    pub fn remove_prefixed(&mut self, prefix: Prefix, key: impl AsRef<[u8]>) -> Option<Vec<u8>> {
        self.remove(prefix.key(key))
    }

    /// Suffixes of every key of the form `prefix.<suffix>`, in key order.
    ///
    /// Keys that merely start with the prefix text (`parameters.x` for the
    /// `parameter` prefix) are not included.
    pub fn prefixed_keys(&self, prefix: Prefix) -> Vec<&[u8]> {
        self.keys().filter_map(|key| prefix.strip(key)).collect()
    }

    /// Build a new header with `prefix.key` written for every listed key.
    ///
    /// Unlike [`Header::copy`], keys missing from `self` are still written,
    /// with an empty value. Values are copied byte for byte.
    pub fn copy_prefixed<I, S>(&self, prefix: Prefix, keys: I) -> Header
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut header = Header::new();
        for key in keys {
            let full = prefix.key(key);
            let value = self.get_bytes(&full).unwrap_or_default().to_vec();
            header.set(full, value);
        }
        header
    }
}
