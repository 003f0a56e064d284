//! Partition-tree depth from a node address.
//!
//! Node addresses are concatenated `[childIndex,siblingCount]` pairs, e.g.
//! `[0,2][1,2]` for the second child of the first child of the root. Each
//! pair adds one level.

use super::Header;
use crate::protocol::param;

/// Depth encoded by a node address.
///
/// Brackets and spaces are dropped and the remaining text is split on `,`,
/// with every `][` boundary counting as a `,`. The level is the number of
/// tokens divided by two; empty tokens count, and a trailing unmatched token
/// is dropped without error.
///
/// ```
/// use ptp_header::node_level;
///
/// assert_eq!(node_level(""), 0);
/// assert_eq!(node_level("[0,1]"), 1);
/// assert_eq!(node_level("[0,1][0,2]"), 2);
/// assert_eq!(node_level("[1,]"), 1);
/// ```
pub fn node_level(node: impl AsRef<[u8]>) -> usize {
    let mut tokens = 1;
    let mut prev = None;
    for &byte in node.as_ref().iter().filter(|&&b| b != b' ') {
        match byte {
            b',' => tokens += 1,
            b'[' if prev == Some(b']') => tokens += 1,
            _ => {}
        }
        prev = Some(byte);
    }
    tokens / 2
}

impl Header {
    /// Depth of this node in the partition tree; `0` when `node` is absent.
    pub fn level(&self) -> usize {
        node_level(self.get_bytes(param::NODE).unwrap_or_default())
    }
}
