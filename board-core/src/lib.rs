//! # board-core
//!
//! Pure logic for board-sync (no I/O, instant tests).
//!
//! This crate implements the leaderboard store and the update formatter
//! without any network I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce
//! output without side effects. The actual I/O (REST fetches, push-channel
//! emissions) is performed by `board-client`, which dispatches the
//! [`StateChange`] deltas this crate defines and applies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod store;

pub use format::format_update;
pub use store::{BoardState, StateChange};
