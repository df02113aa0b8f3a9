//! User records and the write-path transaction body.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user record as returned by the server.
///
/// The server attaches more than the core cares about (registration date,
/// portfolio, record history). Those fields ride in `extra` untouched so a
/// wholesale replace-on-update never loses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identity key.
    pub id: UserId,
    /// Unique display name.
    pub username: String,
    /// Cash balance.
    #[serde(default)]
    pub balance: f64,
    /// Total portfolio value; the leaderboard ranks on this.
    #[serde(default)]
    pub value: f64,
    /// Server-defined fields the core passes through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl User {
    /// Create a user with only the core fields set (tests, fixtures).
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            balance: 0.0,
            value: 0.0,
            extra: serde_json::Map::new(),
        }
    }
}

/// Slim user projection returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Server-assigned identity key.
    pub id: UserId,
    /// Unique display name.
    pub username: String,
    /// Total portfolio value.
    pub value: f64,
    /// Cash balance.
    pub balance: f64,
}

/// A buy/sell request submitted to the transaction gateway.
///
/// The authoritative copy lives server-side; this core never persists
/// transactions locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The user placing the transaction.
    pub user: UserId,
    /// Ticker symbol.
    pub symbol: String,
    /// Number of shares.
    pub shares: u32,
    /// true = buy, false = sell.
    pub purchase: bool,
    /// true = short position, false = long.
    pub short: bool,
}
