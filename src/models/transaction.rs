//! Transaction model
//!
//! A payment moving money out of (sent) or into (received) the principal's
//! account. The amount is always positive; the direction carries the sign.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Category applied when none is given
pub const DEFAULT_CATEGORY: &str = "other";

/// Category applied to manually entered sends and requests
pub const MANUAL_ENTRY_CATEGORY: &str = "personal";

/// Largest amount a single transaction may carry: one billion.
///
/// Keeps the sum of any ledger that fits in memory well inside `i64` cents.
pub const MAX_TRANSACTION_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Whether money leaves or enters the principal's account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "sent")]
    Outgoing,
    #[serde(rename = "received")]
    Incoming,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outgoing => write!(f, "sent"),
            Self::Incoming => write!(f, "received"),
        }
    }
}

/// Settlement state of a transaction
///
/// Only `Pending` and `Completed` occur in practice; the enum is marked
/// non-exhaustive so a `Failed` state can be added without breaking callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum TransactionState {
    /// Not yet settled (e.g. an outstanding payment request)
    Pending,
    /// Settled
    Completed,
}

impl TransactionState {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A payment transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, increasing in creation order
    pub id: TransactionId,

    /// Whether the money went out or came in
    pub direction: Direction,

    /// Free-form name or handle of the other party
    pub counterparty: String,

    /// Always positive
    pub amount: Money,

    /// Calendar date the transaction occurred on
    pub occurred_on: NaiveDate,

    pub state: TransactionState,

    /// Free-form grouping tag
    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Transaction {
    /// Build a transaction, defaulting the category to "other" when absent
    /// or blank.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TransactionId,
        direction: Direction,
        counterparty: impl Into<String>,
        amount: Money,
        occurred_on: NaiveDate,
        state: TransactionState,
        category: Option<&str>,
        note: Option<String>,
    ) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        Self {
            id,
            direction,
            counterparty: counterparty.into(),
            amount,
            occurred_on,
            state,
            category,
            note,
        }
    }

    pub fn is_outgoing(&self) -> bool {
        self.direction == Direction::Outgoing
    }

    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// The note text, or an empty string when there is none
    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    /// Amount with the direction's sign applied (negative when sent)
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Outgoing => -self.amount,
            Direction::Incoming => self.amount,
        }
    }

    /// Validate the record invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.counterparty.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCounterparty);
        }
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_TRANSACTION_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_outgoing() { "-" } else { "+" };
        write!(
            f,
            "{} {} {}{}",
            self.occurred_on.format("%Y-%m-%d"),
            self.counterparty,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyCounterparty,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCounterparty => write!(f, "Counterparty is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the limit of {}",
                amount, MAX_TRANSACTION_AMOUNT
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
