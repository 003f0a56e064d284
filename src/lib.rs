//! # ptp-header
//!
//! Message headers for coordinating a tree of cooperating SMT solver
//! processes.
//!
//! A controller and its partition workers exchange commands, parameters and
//! statistics as flat string-keyed [`Header`] records. This crate provides:
//!
//! - **Header record**: ordered, unique-key byte-string map with `prefix.key`
//!   namespacing ([`Prefix`]) and partition-tree depth decoding
//!   ([`Header::level`])
//! - **Codec**: strict parser and serializer for the `{"k":"v",...}` wire
//!   format, over slices, blocking streams and tokio streams
//! - **Protocol vocabulary**: command names, parameter names, backend ids and
//!   the [`Task`](protocol::Task) enumeration
//!
//! Transport framing, the solver loop and clause sharing live outside this
//! crate; headers are the payload they exchange.
//!
//! ## Example
//!
//! ```
//! use ptp_header::protocol::{command, param};
//! use ptp_header::{codec, Header, Prefix};
//!
//! // Controller side
//! let mut header = Header::new();
//! header.set(param::COMMAND, command::PARTITION);
//! header.set(param::NODE, "[0,2][1,2]");
//! header.set_prefixed(Prefix::PARAMETER, param::SEED, "17");
//!
//! let mut wire = Vec::new();
//! codec::write_header(&mut wire, &header).unwrap();
//!
//! // Worker side
//! let received = codec::read_header(&mut wire.as_slice()).unwrap();
//! assert_eq!(received.command(), Some(command::PARTITION));
//! assert_eq!(received.level(), 2);
//! assert_eq!(received.get_prefixed(Prefix::PARAMETER, param::SEED), "17");
//! ```

pub mod codec;
pub mod error;
pub mod header;
pub mod protocol;

pub use error::{ParseError, Result};
pub use header::{node_level, Header, Prefix};
