//! Update formatter: maps a push-update envelope to a notification message.

use board_types::{UpdateEnvelope, UpdateKind};

/// Produce the human-readable notification message for an envelope, if any.
///
/// Total over every [`UpdateKind`] with an explicit default of no message,
/// so adding kinds later requires no structural change. Only the
/// `transaction` kind formats today; the server's reserved kinds
/// (tracking/untracking) fall through to `None`.
pub fn format_update(envelope: &UpdateEnvelope) -> Option<String> {
    match &envelope.kind {
        UpdateKind::Transaction(update) => Some(format!(
            "{} {} {} {} shares of {}.",
            update.user,
            if update.purchase { "purchased" } else { "sold" },
            update.shares,
            if update.short { "short" } else { "long" },
            update.symbol.to_uppercase(),
        )),
        UpdateKind::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_types::{TransactionUpdate, User, UserId};

    fn envelope(kind: UpdateKind) -> UpdateEnvelope {
        UpdateEnvelope {
            kind,
            user: User::new(UserId::new(1), "alice"),
        }
    }

    fn transaction(user: &str, purchase: bool, shares: u32, short: bool, symbol: &str) -> UpdateKind {
        UpdateKind::Transaction(TransactionUpdate {
            user: user.into(),
            symbol: symbol.into(),
            shares,
            purchase,
            short,
        })
    }

    #[test]
    fn purchase_long_message() {
        let env = envelope(transaction("alice", true, 5, false, "abc"));
        assert_eq!(
            format_update(&env).unwrap(),
            "alice purchased 5 long shares of ABC."
        );
    }

    #[test]
    fn sale_short_message() {
        let env = envelope(transaction("bob", false, 12, true, "tsla"));
        assert_eq!(
            format_update(&env).unwrap(),
            "bob sold 12 short shares of TSLA."
        );
    }

    #[test]
    fn symbol_is_uppercased() {
        let env = envelope(transaction("carol", true, 1, false, "aApL"));
        assert_eq!(
            format_update(&env).unwrap(),
            "carol purchased 1 long shares of AAPL."
        );
    }

    #[test]
    fn unknown_kind_formats_nothing() {
        let env = envelope(UpdateKind::Other);
        assert_eq!(format_update(&env), None);
    }

    #[test]
    fn deterministic_for_same_input() {
        let env = envelope(transaction("alice", true, 5, false, "abc"));
        assert_eq!(format_update(&env), format_update(&env));
    }
}
