//! Protocol module - shared vocabulary of the partition-tree protocol.
//!
//! This module holds the static contract every participant agrees on:
//! - Command names sent in the `command` parameter
//! - Parameter (header key) names
//! - Backend solver identifiers and statistics limits
//! - The [`Task`] enumeration used for statistics labels

mod task;
mod vocabulary;

pub use task::{Task, UnknownTask, TASK_NAMES};
pub use vocabulary::{command, param, solver, stats};
