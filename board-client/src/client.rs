//! BoardClient - the main interface for board-sync.
//!
//! This module provides [`BoardClient`], the primary API for applications
//! to keep a local leaderboard view consistent with the server.
//!
//! # Architecture
//!
//! BoardClient uses a pure store (from board-core) for state and
//! interprets operations into I/O via the Api and PushChannel ports.
//!
//! ```text
//! Application → BoardClient → Api (REST) / PushChannel → Network
//!                   ↓
//!              board-core (pure store, no I/O)
//! ```
//!
//! Every state mutation is dispatched as a [`StateChange`]: applied to the
//! owned store and forwarded on the changes channel in emission order, so
//! an upstream store (UI layer) can mirror the same deltas.
//!
//! # Example
//!
//! ```ignore
//! use board_client::{BoardClient, BoardConfig, HttpApi};
//!
//! let api = HttpApi::new("https://example.com");
//! let (client, mut events) = BoardClient::new(BoardConfig::new(viewer), api, channel);
//!
//! client.initialize().await?;
//! while client.next_update().await.is_ok() {}
//! ```

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

use board_core::{format_update, BoardState, StateChange};
use board_types::{NotificationEntry, Signal, Transaction, UpdateEnvelope, User, UserId};
use std::collections::HashMap;

use crate::api::{Api, ApiError};
use crate::channel::{ChannelError, PushChannel};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// REST API error.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Push-channel error.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Configuration for BoardClient.
#[derive(Debug, Clone, Copy)]
pub struct BoardConfig {
    /// The authenticated viewer's own user id. Its subscription is
    /// protected from unsubscription for self-tracking.
    pub viewer: UserId,
}

impl BoardConfig {
    /// Create a configuration for the given viewer.
    pub fn new(viewer: UserId) -> Self {
        Self { viewer }
    }
}

/// A user-facing message surfaced from a rejected write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// The server-provided message, fit for display.
    pub message: String,
}

/// Receiving halves of the client's upward event flow.
///
/// `changes` carries every dispatched [`StateChange`] in emission order;
/// `alerts` carries user-facing error messages from the write path.
pub struct BoardEvents {
    /// State deltas, in emission order.
    pub changes: UnboundedReceiver<StateChange>,
    /// User-facing messages from rejected writes.
    pub alerts: UnboundedReceiver<Alert>,
}

/// The main sync client.
///
/// Owns the leaderboard store and drives it from the snapshot fetch and
/// the push channel. All operations take `&self`; concurrency is
/// interleaved async tasks, never parallel mutation.
pub struct BoardClient<A: Api, C: PushChannel> {
    config: BoardConfig,
    api: A,
    channel: C,
    state: Arc<Mutex<BoardState>>,
    // Taken before the bootstrap fetch begins, so concurrent initialize()
    // calls serialize and the flag check is observed consistently.
    bootstrap: Mutex<()>,
    changes: UnboundedSender<StateChange>,
    alerts: UnboundedSender<Alert>,
}

impl<A: Api, C: PushChannel> BoardClient<A, C> {
    /// Create a new BoardClient and the receiving halves of its event flow.
    pub fn new(config: BoardConfig, api: A, channel: C) -> (Self, BoardEvents) {
        let (changes_tx, changes_rx) = unbounded_channel();
        let (alerts_tx, alerts_rx) = unbounded_channel();
        let client = Self {
            config,
            api,
            channel,
            state: Arc::new(Mutex::new(BoardState::new())),
            bootstrap: Mutex::new(()),
            changes: changes_tx,
            alerts: alerts_tx,
        };
        let events = BoardEvents {
            changes: changes_rx,
            alerts: alerts_rx,
        };
        (client, events)
    }

    /// Apply a delta to the owned store and forward it upward.
    async fn dispatch(&self, change: StateChange) {
        {
            let mut state = self.state.lock().await;
            state.apply(&change);
        }
        // Receiver may be dropped when no UI is attached.
        let _ = self.changes.send(change);
    }

    /// One-time bootstrap: fetch the snapshot, subscribe to every member,
    /// publish the ordering, set the flag.
    ///
    /// The guard is held across the fetch, so at most one snapshot fetch
    /// and one subscribe burst occur per process lifetime even when calls
    /// race. A failed bootstrap leaves the flag clear and may be retried.
    pub async fn initialize(&self) -> Result<(), ClientError> {
        let _bootstrap = self.bootstrap.lock().await;
        if self.state.lock().await.is_initialized() {
            tracing::debug!("leaderboard already initialized");
            return Ok(());
        }

        let snapshot = self.api.fetch_leaderboard().await?;
        for user in &snapshot {
            self.channel.emit(Signal::Subscribe(user.id)).await?;
            self.dispatch(StateChange::AddSubscribed(user.clone())).await;
        }

        let ids: Vec<UserId> = snapshot.iter().map(|u| u.id).collect();
        self.dispatch(StateChange::SetLeaderboard(ids)).await;
        self.dispatch(StateChange::LeaderboardInit).await;

        tracing::info!(members = snapshot.len(), "leaderboard bootstrap complete");
        Ok(())
    }

    /// Subscribe to a single user: emit the signal, fetch the record,
    /// store it. Does not touch leaderboard membership.
    pub async fn subscribe(&self, id: UserId) -> Result<(), ClientError> {
        self.channel.emit(Signal::Subscribe(id)).await?;
        let user = self.api.fetch_user(id).await?;
        self.dispatch(StateChange::AddSubscribed(user)).await;
        Ok(())
    }

    /// Unsubscribe from a user, unless the id is on the leaderboard or is
    /// the viewer's own. Protected ids are a silent no-op: the
    /// subscription is still needed for display or self-tracking.
    pub async fn unsubscribe(&self, id: UserId) -> Result<(), ClientError> {
        let allowed = {
            let state = self.state.lock().await;
            state.can_unsubscribe(id, self.config.viewer)
        };
        if !allowed {
            tracing::debug!(%id, "unsubscribe ignored for protected id");
            return Ok(());
        }

        self.channel.emit(Signal::Unsubscribe(id)).await?;
        self.dispatch(StateChange::RemoveSubscribed(id)).await;
        Ok(())
    }

    /// Apply one inbound push update.
    ///
    /// Always replaces the stored record for the affected user (full
    /// replace, not a merge). If the formatter produces a message, a
    /// notification entry is appended as well.
    pub async fn apply_push_update(&self, envelope: UpdateEnvelope) {
        self.dispatch(StateChange::UpdateSubscribed(envelope.user.clone()))
            .await;

        if let Some(message) = format_update(&envelope) {
            tracing::debug!(%message, "push notification");
            let entry =
                NotificationEntry::new("user", message, envelope.kind.payload(), unix_now());
            self.dispatch(StateChange::AddNotification(entry)).await;
        }
    }

    /// Receive the next envelope from the push channel and apply it.
    pub async fn next_update(&self) -> Result<(), ClientError> {
        let envelope = self.channel.recv().await?;
        self.apply_push_update(envelope).await;
        Ok(())
    }

    /// Submit a transaction.
    ///
    /// The HTTP response is never merged into local state - reconciliation
    /// arrives via the push channel, so an out-of-order response cannot
    /// race a push event. A server rejection is surfaced on the alerts
    /// channel and recovered; either outcome dispatches the neutral
    /// marker. Transport failures propagate without a marker.
    pub async fn create_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ClientError> {
        match self.api.create_transaction(transaction, token).await {
            Ok(()) => {}
            Err(ApiError::Rejected { message }) => {
                tracing::error!(%message, "transaction create rejected");
                let _ = self.alerts.send(Alert { message });
            }
            Err(e) => return Err(e.into()),
        }
        self.dispatch(StateChange::Noop).await;
        Ok(())
    }

    /// Retract a transaction. Same contract as [`Self::create_transaction`].
    pub async fn remove_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ClientError> {
        match self.api.remove_transaction(transaction, token).await {
            Ok(()) => {}
            Err(ApiError::Rejected { message }) => {
                tracing::error!(%message, "transaction remove rejected");
                let _ = self.alerts.send(Alert { message });
            }
            Err(e) => return Err(e.into()),
        }
        self.dispatch(StateChange::Noop).await;
        Ok(())
    }

    /// Wholesale replace of the leaderboard ordering.
    pub async fn set_leaderboard(&self, ids: Vec<UserId>) {
        self.dispatch(StateChange::SetLeaderboard(ids)).await;
    }

    /// Administrative bulk replace of the entire local user map, for an
    /// out-of-band full resync.
    pub async fn replace_all_users(&self, new_state: HashMap<UserId, User>) {
        self.dispatch(StateChange::UpdateAllUsers(new_state)).await;
    }

    /// Current leaderboard ordering.
    pub async fn leaderboard(&self) -> Vec<UserId> {
        self.state.lock().await.leaderboard().to_vec()
    }

    /// Current record for a subscribed user.
    pub async fn user(&self, id: UserId) -> Option<User> {
        self.state.lock().await.user(id).cloned()
    }

    /// Whether the given id is in the subscription set.
    pub async fn is_subscribed(&self, id: UserId) -> bool {
        self.state.lock().await.is_subscribed(id)
    }

    /// Whether the one-time bootstrap has completed.
    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.is_initialized()
    }

    /// The notification log, oldest first.
    pub async fn notifications(&self) -> Vec<NotificationEntry> {
        self.state.lock().await.notifications().to_vec()
    }

    /// Get a reference to the underlying api (for testing).
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Get a reference to the underlying channel (for testing).
    pub fn channel(&self) -> &C {
        &self.channel
    }
}

/// Current unix time in seconds.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
