//! Mock API for testing.
//!
//! Allows seeding server-side users and capturing calls for verification.

use super::{Api, ApiError};
use async_trait::async_trait;
use board_types::{Transaction, User, UserId, UserSummary};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A recorded write-path call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    /// The transaction payload that was sent.
    pub transaction: Transaction,
    /// The bearer token it was sent with.
    pub token: String,
    /// true for create, false for remove.
    pub create: bool,
}

/// Mock API for testing.
///
/// Clones share state, so tests can hold a handle while the client owns
/// another.
#[derive(Debug, Default)]
pub struct MockApi {
    inner: Arc<Mutex<MockApiInner>>,
}

#[derive(Debug, Default)]
struct MockApiInner {
    snapshot: Vec<User>,
    users: HashMap<UserId, User>,
    leaderboard_fetches: usize,
    user_fetches: Vec<UserId>,
    writes: Vec<RecordedWrite>,
    fail_next_fetch: Option<String>,
    reject_next_write: Option<String>,
    fail_next_write: Option<String>,
}

impl MockApi {
    /// Create an empty mock API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the leaderboard snapshot (also registers each member for
    /// single-user fetches).
    pub fn seed_snapshot(&self, users: Vec<User>) {
        let mut inner = self.inner.lock().unwrap();
        for user in &users {
            inner.users.insert(user.id, user.clone());
        }
        inner.snapshot = users;
    }

    /// Register a user for single-user fetches without putting it on the
    /// snapshot.
    pub fn seed_user(&self, user: User) {
        let mut inner = self.inner.lock().unwrap();
        inner.users.insert(user.id, user);
    }

    /// Number of leaderboard snapshot fetches performed.
    pub fn leaderboard_fetches(&self) -> usize {
        self.inner.lock().unwrap().leaderboard_fetches
    }

    /// Ids fetched via `fetch_user`, in call order.
    pub fn user_fetches(&self) -> Vec<UserId> {
        self.inner.lock().unwrap().user_fetches.clone()
    }

    /// All write-path calls, in call order.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.inner.lock().unwrap().writes.clone()
    }

    /// Cause the next fetch (leaderboard or user) to fail with a
    /// transport error.
    pub fn fail_next_fetch(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_fetch = Some(error.to_string());
    }

    /// Cause the next write to be rejected with the given server message.
    pub fn reject_next_write(&self, message: &str) {
        self.inner.lock().unwrap().reject_next_write = Some(message.to_string());
    }

    /// Cause the next write to fail with a transport error.
    pub fn fail_next_write(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_write = Some(error.to_string());
    }

    fn record_write(&self, transaction: &Transaction, token: &str, create: bool) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_write.take() {
            return Err(ApiError::Transport(error));
        }
        if let Some(message) = inner.reject_next_write.take() {
            return Err(ApiError::Rejected { message });
        }
        inner.writes.push(RecordedWrite {
            transaction: transaction.clone(),
            token: token.to_string(),
            create,
        });
        Ok(())
    }
}

impl Clone for MockApi {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Api for MockApi {
    async fn fetch_leaderboard(&self) -> Result<Vec<User>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(ApiError::Transport(error));
        }
        inner.leaderboard_fetches += 1;
        Ok(inner.snapshot.clone())
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(ApiError::Transport(error));
        }
        inner.user_fetches.push(id);
        inner.users.get(&id).cloned().ok_or(ApiError::Rejected {
            message: format!("No user with ID {} exists.", id),
        })
    }

    async fn fetch_all_users(&self) -> Result<Vec<User>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(ApiError::Transport(error));
        }
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| b.value.total_cmp(&a.value));
        Ok(users)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(ApiError::Transport(error));
        }
        Ok(inner
            .users
            .values()
            .filter(|u| u.username.contains(query))
            .map(|u| UserSummary {
                id: u.id,
                username: u.username.clone(),
                value: u.value,
                balance: u.balance,
            })
            .collect())
    }

    async fn create_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError> {
        self.record_write(transaction, token, true)
    }

    async fn remove_transaction(
        &self,
        transaction: &Transaction,
        token: &str,
    ) -> Result<(), ApiError> {
        self.record_write(transaction, token, false)
    }
}
