//! The leaderboard store and its state-change deltas.
//!
//! [`BoardState`] is the single owner of the leaderboard ordering, the
//! subscribed-user map, the one-way initialization flag, and the
//! notification log. The only mutation path is [`BoardState::apply`],
//! which interprets [`StateChange`] deltas in emission order.
//!
//! The actual I/O (snapshot fetch, subscribe signals) is performed by
//! board-client, not by this module. This enables instant unit testing
//! without network mocks.

use board_types::{NotificationEntry, User, UserId};
use std::collections::HashMap;

/// A discrete state delta published by client operations.
///
/// Each variant is a pure description of a change; the receiving store
/// applies them in emission order. Applying the same non-notification
/// delta twice yields the same state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Wholesale replace of the leaderboard ordering.
    SetLeaderboard(Vec<UserId>),
    /// A user entered the subscription set with its full record.
    AddSubscribed(User),
    /// Full replacement of a subscribed user's record.
    UpdateSubscribed(User),
    /// A user left the subscription set.
    RemoveSubscribed(UserId),
    /// An entry was appended to the notification log.
    AddNotification(NotificationEntry),
    /// The one-time bootstrap completed; flips the flag, never clears it.
    LeaderboardInit,
    /// Administrative bulk replace of the entire user map.
    UpdateAllUsers(HashMap<UserId, User>),
    /// Neutral marker published after write-path completions.
    Noop,
}

/// Client-local view of the leaderboard and its subscriptions.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    leaderboard: Vec<UserId>,
    users: HashMap<UserId, User>,
    initialized: bool,
    notifications: Vec<NotificationEntry>,
}

impl BoardState {
    /// Create an empty, uninitialized state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one state delta. The only mutation path.
    pub fn apply(&mut self, change: &StateChange) {
        match change {
            StateChange::SetLeaderboard(ids) => {
                self.leaderboard = ids.clone();
            }
            StateChange::AddSubscribed(user) | StateChange::UpdateSubscribed(user) => {
                // Full replace, never a field-by-field merge.
                self.users.insert(user.id, user.clone());
            }
            StateChange::RemoveSubscribed(id) => {
                self.users.remove(id);
            }
            StateChange::AddNotification(entry) => {
                self.notifications.push(entry.clone());
            }
            StateChange::LeaderboardInit => {
                self.initialized = true;
            }
            StateChange::UpdateAllUsers(new_state) => {
                self.users = new_state.clone();
            }
            StateChange::Noop => {}
        }
    }

    /// The unsubscribe guard: a user may only be dropped if it is not on
    /// the leaderboard and not the viewer's own id.
    pub fn can_unsubscribe(&self, id: UserId, viewer: UserId) -> bool {
        !self.leaderboard.contains(&id) && id != viewer
    }

    /// The leaderboard ordering, as set at bootstrap.
    pub fn leaderboard(&self) -> &[UserId] {
        &self.leaderboard
    }

    /// Look up a subscribed user's record.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Whether the given id is in the subscription set.
    pub fn is_subscribed(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// Number of subscribed users.
    pub fn subscribed_count(&self) -> usize {
        self.users.len()
    }

    /// Whether the one-time bootstrap has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The notification log, oldest first.
    pub fn notifications(&self) -> &[NotificationEntry] {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn user(id: u64, name: &str) -> User {
        User::new(UserId::new(id), name)
    }

    #[test]
    fn starts_empty_and_uninitialized() {
        let state = BoardState::new();
        assert!(state.leaderboard().is_empty());
        assert!(!state.is_initialized());
        assert_eq!(state.subscribed_count(), 0);
        assert!(state.notifications().is_empty());
    }

    #[test]
    fn set_leaderboard_replaces_wholesale() {
        let mut state = BoardState::new();
        state.apply(&StateChange::SetLeaderboard(vec![
            UserId::new(1),
            UserId::new(2),
        ]));
        assert_eq!(state.leaderboard(), &[UserId::new(1), UserId::new(2)]);

        state.apply(&StateChange::SetLeaderboard(vec![UserId::new(3)]));
        assert_eq!(state.leaderboard(), &[UserId::new(3)]);
    }

    #[test]
    fn add_subscribed_is_idempotent() {
        let mut state = BoardState::new();
        state.apply(&StateChange::AddSubscribed(user(1, "alice")));
        state.apply(&StateChange::AddSubscribed(user(1, "alice")));
        assert_eq!(state.subscribed_count(), 1);
        assert!(state.is_subscribed(UserId::new(1)));
    }

    #[test]
    fn update_subscribed_replaces_full_record() {
        let mut state = BoardState::new();
        let mut before = user(1, "alice");
        before
            .extra
            .insert("portfolio".into(), Value::Array(vec![Value::from(1)]));
        state.apply(&StateChange::AddSubscribed(before));

        // Replacement record without the extra field: the old field must
        // not survive (replace, not merge).
        let after = user(1, "alice");
        state.apply(&StateChange::UpdateSubscribed(after.clone()));
        assert_eq!(state.user(UserId::new(1)), Some(&after));
    }

    #[test]
    fn remove_subscribed_drops_user() {
        let mut state = BoardState::new();
        state.apply(&StateChange::AddSubscribed(user(4, "dave")));
        state.apply(&StateChange::RemoveSubscribed(UserId::new(4)));
        assert!(!state.is_subscribed(UserId::new(4)));

        // Removing again is harmless.
        state.apply(&StateChange::RemoveSubscribed(UserId::new(4)));
        assert_eq!(state.subscribed_count(), 0);
    }

    #[test]
    fn leaderboard_init_is_one_way() {
        let mut state = BoardState::new();
        state.apply(&StateChange::LeaderboardInit);
        assert!(state.is_initialized());
        state.apply(&StateChange::LeaderboardInit);
        assert!(state.is_initialized());
    }

    #[test]
    fn update_all_users_replaces_whole_map() {
        let mut state = BoardState::new();
        state.apply(&StateChange::AddSubscribed(user(1, "alice")));
        state.apply(&StateChange::AddSubscribed(user(2, "bob")));

        let mut new_state = HashMap::new();
        new_state.insert(UserId::new(9), user(9, "zara"));
        state.apply(&StateChange::UpdateAllUsers(new_state));

        assert!(!state.is_subscribed(UserId::new(1)));
        assert!(!state.is_subscribed(UserId::new(2)));
        assert!(state.is_subscribed(UserId::new(9)));
    }

    #[test]
    fn notifications_append_in_order() {
        let mut state = BoardState::new();
        state.apply(&StateChange::AddNotification(NotificationEntry::new(
            "user",
            "first",
            Value::Null,
            100,
        )));
        state.apply(&StateChange::AddNotification(NotificationEntry::new(
            "user",
            "second",
            Value::Null,
            200,
        )));
        let log = state.notifications();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].message, "first");
        assert_eq!(log[1].message, "second");
    }

    #[test]
    fn noop_changes_nothing() {
        let mut state = BoardState::new();
        state.apply(&StateChange::AddSubscribed(user(1, "alice")));
        let before = state.clone();
        state.apply(&StateChange::Noop);
        assert_eq!(state.leaderboard(), before.leaderboard());
        assert_eq!(state.subscribed_count(), before.subscribed_count());
        assert_eq!(state.is_initialized(), before.is_initialized());
    }

    // ===========================================
    // Unsubscribe Guard Tests
    // ===========================================

    #[test]
    fn guard_blocks_leaderboard_members() {
        let mut state = BoardState::new();
        state.apply(&StateChange::SetLeaderboard(vec![
            UserId::new(1),
            UserId::new(2),
        ]));
        assert!(!state.can_unsubscribe(UserId::new(2), UserId::new(3)));
    }

    #[test]
    fn guard_blocks_viewer_id() {
        let state = BoardState::new();
        assert!(!state.can_unsubscribe(UserId::new(3), UserId::new(3)));
    }

    #[test]
    fn guard_allows_unprotected_ids() {
        let mut state = BoardState::new();
        state.apply(&StateChange::SetLeaderboard(vec![
            UserId::new(1),
            UserId::new(2),
        ]));
        assert!(state.can_unsubscribe(UserId::new(4), UserId::new(3)));
    }
}
