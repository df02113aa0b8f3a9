//! # board-types
//!
//! Wire format types for the board-sync leaderboard synchronization engine.
//!
//! This crate provides the foundational types used across all board-sync
//! crates:
//! - [`UserId`] - Identity type for leaderboard members
//! - [`User`], [`UserSummary`] - Server-defined user records
//! - [`Transaction`] - Write-path request body
//! - [`UpdateEnvelope`], [`UpdateKind`], [`Signal`] - Push-channel payloads
//! - [`NotificationEntry`] - Append-only notification log entries

#![warn(missing_docs)]
#![warn(clippy::all)]

mod ids;
mod update;
mod user;

pub use ids::UserId;
pub use update::{NotificationEntry, Signal, TransactionUpdate, UpdateEnvelope, UpdateKind};
pub use user::{Transaction, User, UserSummary};
