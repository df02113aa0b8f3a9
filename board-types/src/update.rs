//! Push-channel update envelopes and the notification log entry.

use crate::ids::UserId;
use crate::user::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One state change delivered by the push channel.
///
/// Wire shape: `{"type": ..., "update": ..., "user": ...}` where `user` is
/// the affected user's full current record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateEnvelope {
    /// The kind of update plus its kind-specific payload.
    #[serde(flatten)]
    pub kind: UpdateKind,
    /// Full replacement record for the affected user.
    pub user: User,
}

// Deserialized by hand: an unknown `type` still carries an `update`
// payload on the wire, which a derived catch-all variant cannot absorb.
// The raw tag is matched first and the payload decoded only for kinds
// this core recognizes.
impl<'de> Deserialize<'de> for UpdateEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawEnvelope {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            update: Value,
            user: User,
        }

        let raw = RawEnvelope::deserialize(deserializer)?;
        let kind = match raw.kind.as_str() {
            "transaction" => UpdateKind::Transaction(
                serde_json::from_value(raw.update).map_err(serde::de::Error::custom)?,
            ),
            _ => UpdateKind::Other,
        };
        Ok(Self {
            kind,
            user: raw.user,
        })
    }
}

/// The kind-specific half of an envelope.
///
/// The server reserves further kinds (tracking/untracking); anything this
/// core does not recognize lands in [`UpdateKind::Other`] whatever its
/// payload looks like, and is applied as a plain user replace with no
/// notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "update", rename_all = "lowercase")]
pub enum UpdateKind {
    /// A transaction was created or closed.
    Transaction(TransactionUpdate),
    /// Unrecognized update kind.
    Other,
}

impl UpdateKind {
    /// The raw update payload as JSON, for the notification log.
    pub fn payload(&self) -> Value {
        match self {
            Self::Transaction(update) => {
                serde_json::to_value(update).unwrap_or(Value::Null)
            }
            Self::Other => Value::Null,
        }
    }
}

/// Payload of a `transaction` update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// Username of the acting user (display name, not id).
    pub user: String,
    /// Ticker symbol as the server stores it (lowercase).
    pub symbol: String,
    /// Number of shares.
    pub shares: u32,
    /// true = buy, false = sell.
    pub purchase: bool,
    /// true = short position, false = long.
    pub short: bool,
}

/// An entry in the append-only notification log.
///
/// Entries are never mutated or removed once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// Notification category (currently always `"user"`).
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// The raw update payload that produced this notification.
    pub payload: Value,
    /// Unix timestamp (seconds) at which the entry was appended.
    pub timestamp: u64,
}

impl NotificationEntry {
    /// Create a notification entry.
    pub fn new(kind: impl Into<String>, message: impl Into<String>, payload: Value, timestamp: u64) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            payload,
            timestamp,
        }
    }
}

/// Outbound signals emitted on the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "id", rename_all = "lowercase")]
pub enum Signal {
    /// Register interest in a user's update stream.
    Subscribe(UserId),
    /// Drop interest in a user's update stream.
    Unsubscribe(UserId),
}
