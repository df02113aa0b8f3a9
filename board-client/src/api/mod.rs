//! REST API abstraction for board-sync.
//!
//! This module provides a pluggable API layer that abstracts the REST
//! backend (reqwest over HTTP, mock for testing).
//!
//! # Design
//!
//! The api trait is async and stateless per call:
//! - `fetch_leaderboard()` returns the ordered authoritative snapshot
//! - `fetch_user()` returns one user's current record
//! - `create_transaction()` / `remove_transaction()` are the bearer-auth
//!   write path
//!
//! # Example
//!
//! ```ignore
//! let api = HttpApi::new("https://example.com");
//! let snapshot = api.fetch_leaderboard().await?;
//! ```

mod http;
mod mock;

pub use http::HttpApi;
pub use mock::{MockApi, RecordedWrite};

use async_trait::async_trait;
use board_types::{Transaction, User, UserId, UserSummary};
use thiserror::Error;

/// API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the request with a structured error message.
    #[error("request rejected: {message}")]
    Rejected {
        /// Server-provided message, fit for showing to the user.
        message: String,
    },

    /// Non-success response whose body did not carry the error shape.
    #[error("unexpected response (status {status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A success response whose body failed to decode.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

/// REST port for the leaderboard backend.
///
/// Implementations handle the underlying HTTP mechanics (reqwest, mock).
#[async_trait]
pub trait Api: Send + Sync {
    /// Fetch the authoritative leaderboard snapshot, in ranking order.
    async fn fetch_leaderboard(&self) -> Result<Vec<User>, ApiError>;

    /// Fetch a single user's current record.
    async fn fetch_user(&self, id: UserId) -> Result<User, ApiError>;

    /// Fetch every user, in ranking order.
    async fn fetch_all_users(&self) -> Result<Vec<User>, ApiError>;

    /// Search users by username substring.
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError>;

    /// Submit a transaction. Bearer-token authenticated.
    async fn create_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError>;

    /// Retract a transaction, carried as the delete body. Bearer-token
    /// authenticated.
    async fn remove_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError>;
}
