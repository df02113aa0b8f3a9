//! Mock push channel for testing.
//!
//! Allows queueing inbound envelopes and capturing emitted signals.

use super::{ChannelError, PushChannel};
use async_trait::async_trait;
use board_types::{Signal, UpdateEnvelope};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock push channel for testing.
///
/// Clones share state, so tests can queue envelopes and inspect emitted
/// signals while the client owns another handle.
#[derive(Debug, Default)]
pub struct MockChannel {
    inner: Arc<Mutex<MockChannelInner>>,
}

#[derive(Debug, Default)]
struct MockChannelInner {
    emitted: Vec<Signal>,
    inbound: VecDeque<UpdateEnvelope>,
    fail_next_emit: Option<String>,
}

impl MockChannel {
    /// Create a new mock channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an envelope to be returned by the next `recv()` call.
    pub fn queue_update(&self, envelope: UpdateEnvelope) {
        self.inner.lock().unwrap().inbound.push_back(envelope);
    }

    /// All signals emitted so far, in emission order.
    pub fn emitted_signals(&self) -> Vec<Signal> {
        self.inner.lock().unwrap().emitted.clone()
    }

    /// The most recently emitted signal.
    pub fn last_emitted(&self) -> Option<Signal> {
        self.inner.lock().unwrap().emitted.last().copied()
    }

    /// Cause the next emit() to fail with the given error.
    pub fn fail_next_emit(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_emit = Some(error.to_string());
    }

    /// Clear all captured and queued state.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockChannelInner::default();
    }
}

impl Clone for MockChannel {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PushChannel for MockChannel {
    async fn emit(&self, signal: Signal) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_emit.take() {
            return Err(ChannelError::EmitFailed(error));
        }
        inner.emitted.push(signal);
        Ok(())
    }

    async fn recv(&self) -> Result<UpdateEnvelope, ChannelError> {
        let mut inner = self.inner.lock().unwrap();
        inner.inbound.pop_front().ok_or(ChannelError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_types::{User, UserId};

    fn envelope(id: u64) -> UpdateEnvelope {
        UpdateEnvelope {
            kind: board_types::UpdateKind::Other,
            user: User::new(UserId::new(id), format!("user-{}", id)),
        }
    }

    #[tokio::test]
    async fn emit_records_signals_in_order() {
        let channel = MockChannel::new();
        channel.emit(Signal::Subscribe(UserId::new(1))).await.unwrap();
        channel.emit(Signal::Unsubscribe(UserId::new(2))).await.unwrap();

        assert_eq!(
            channel.emitted_signals(),
            vec![
                Signal::Subscribe(UserId::new(1)),
                Signal::Unsubscribe(UserId::new(2)),
            ]
        );
        assert_eq!(channel.last_emitted(), Some(Signal::Unsubscribe(UserId::new(2))));
    }

    #[tokio::test]
    async fn recv_drains_queue_in_order() {
        let channel = MockChannel::new();
        channel.queue_update(envelope(1));
        channel.queue_update(envelope(2));

        assert_eq!(channel.recv().await.unwrap().user.id, UserId::new(1));
        assert_eq!(channel.recv().await.unwrap().user.id, UserId::new(2));
    }

    #[tokio::test]
    async fn recv_empty_returns_closed() {
        let channel = MockChannel::new();
        assert!(matches!(channel.recv().await, Err(ChannelError::Closed)));
    }

    #[tokio::test]
    async fn forced_emit_failure_is_one_shot() {
        let channel = MockChannel::new();
        channel.fail_next_emit("socket gone");

        let result = channel.emit(Signal::Subscribe(UserId::new(1))).await;
        assert!(matches!(result, Err(ChannelError::EmitFailed(_))));
        assert!(channel.emitted_signals().is_empty());

        channel.emit(Signal::Subscribe(UserId::new(1))).await.unwrap();
        assert_eq!(channel.emitted_signals().len(), 1);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let a = MockChannel::new();
        let b = a.clone();
        a.emit(Signal::Subscribe(UserId::new(5))).await.unwrap();
        assert_eq!(b.emitted_signals().len(), 1);

        b.reset();
        assert!(a.emitted_signals().is_empty());
    }
}
