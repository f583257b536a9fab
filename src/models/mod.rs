//! Core data models for PaySphere
//!
//! This module contains the data structures the core operates on: the
//! authenticated principal, payment transactions, money and typed ids.

pub mod ids;
pub mod money;
pub mod principal;
pub mod transaction;

pub use ids::{PrincipalId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use principal::Principal;
pub use transaction::{
    Direction, Transaction, TransactionState, TransactionValidationError, DEFAULT_CATEGORY,
    MANUAL_ENTRY_CATEGORY, MAX_TRANSACTION_AMOUNT,
};
