//! Demo seed data
//!
//! The principal, credentials and transactions a fresh installation starts
//! with. Seed transactions are listed newest-first, matching ledger order.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    Direction, Money, Principal, PrincipalId, Transaction, TransactionId, TransactionState,
};

/// Email of the demo account
pub const DEMO_EMAIL: &str = "john.doe@example.com";

/// Password of the demo account
pub const DEMO_PASSWORD: &str = "password123";

/// Stable id of the demo principal
pub const DEMO_PRINCIPAL_ID: PrincipalId =
    PrincipalId::from_uuid(Uuid::from_u128(0x6f1c_2a4e_8b3d_4c7a_9e15_0d2b_3f4a_1234));

const DEMO_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face";

/// The demo principal, also the template for signups
pub fn demo_principal() -> Principal {
    Principal {
        id: DEMO_PRINCIPAL_ID,
        name: "John Doe".to_string(),
        email: DEMO_EMAIL.to_string(),
        avatar: DEMO_AVATAR.to_string(),
        balance: Money::from_cents(1_245_075),
        account_number: "****1234".to_string(),
    }
}

/// The demo ledger, newest first
pub fn demo_transactions() -> Vec<Transaction> {
    use Direction::{Incoming, Outgoing};
    use TransactionState::{Completed, Pending};

    let rows: [(u64, Direction, &str, i64, u32, TransactionState, &str, &str); 8] = [
        (1, Outgoing, "Sarah Johnson", 15000, 15, Completed, "food", "Dinner payment"),
        (2, Incoming, "Mike Chen", 32050, 14, Completed, "work", "Freelance payment"),
        (3, Outgoing, "Netflix", 1599, 13, Completed, "entertainment", "Monthly subscription"),
        (4, Outgoing, "Uber", 2345, 12, Completed, "transport", "Ride to airport"),
        (5, Incoming, "Emma Wilson", 7500, 11, Pending, "personal", "Split dinner bill"),
        (6, Outgoing, "Amazon", 8999, 10, Completed, "shopping", "Online purchase"),
        (7, Outgoing, "Starbucks", 1250, 9, Completed, "food", "Morning coffee"),
        (8, Incoming, "David Kim", 20000, 8, Completed, "personal", "Loan repayment"),
    ];

    rows.into_iter()
        .filter_map(|(id, direction, who, cents, day, state, category, note)| {
            let date = NaiveDate::from_ymd_opt(2024, 7, day)?;
            Some(Transaction::new(
                TransactionId::new(id),
                direction,
                who,
                Money::from_cents(cents),
                date,
                state,
                Some(category),
                Some(note.to_string()),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_principal() {
        let principal = demo_principal();
        assert_eq!(principal.email, DEMO_EMAIL);
        assert_eq!(principal.balance.to_string(), "$12450.75");
        assert_eq!(principal.id, DEMO_PRINCIPAL_ID);
    }

    #[test]
    fn test_demo_transactions_are_valid_and_unique() {
        let txns = demo_transactions();
        assert_eq!(txns.len(), 8);

        let ids: HashSet<_> = txns.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 8);

        for txn in &txns {
            assert!(txn.validate().is_ok(), "invalid seed {}", txn);
        }
    }

    #[test]
    fn test_demo_transactions_newest_first() {
        let txns = demo_transactions();
        assert!(txns.windows(2).all(|w| w[0].occurred_on >= w[1].occurred_on));
        assert_eq!(txns[0].counterparty, "Sarah Johnson");
        assert_eq!(txns[4].state, TransactionState::Pending);
    }
}
