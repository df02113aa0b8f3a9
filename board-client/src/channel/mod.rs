//! Push-channel abstraction for board-sync.
//!
//! This module provides a pluggable port for the bidirectional event
//! channel. The core depends only on this interface, not on a concrete
//! transport (socket.io, WebSocket, mock).
//!
//! # Design
//!
//! The port has two operations:
//! - `emit()` sends a subscribe/unsubscribe signal outbound
//! - `recv()` yields the next inbound update envelope, in delivery order
//!
//! The core never reorders or buffers inbound envelopes; they are applied
//! in whatever order the channel delivers them.

mod mock;

pub use mock::MockChannel;

use async_trait::async_trait;
use board_types::{Signal, UpdateEnvelope};
use thiserror::Error;

/// Push-channel errors.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel is closed.
    #[error("channel closed")]
    Closed,

    /// An outbound signal could not be sent.
    #[error("emit failed: {0}")]
    EmitFailed(String),

    /// An inbound envelope could not be received.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

/// Bidirectional push-channel port.
///
/// Implementations handle the underlying event transport.
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// Emit an outbound subscribe/unsubscribe signal.
    async fn emit(&self, signal: Signal) -> Result<(), ChannelError>;

    /// Receive the next inbound update envelope.
    ///
    /// Waits until an envelope is available or the channel closes.
    async fn recv(&self) -> Result<UpdateEnvelope, ChannelError>;
}
