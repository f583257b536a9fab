//! Service layer for PaySphere
//!
//! Command handling on top of the storage layer: login and signup, payment
//! entry and ledger queries.

pub mod auth;
pub mod payment;
pub mod query;
pub mod session;

pub use auth::{password_strength, CredentialVerifier, FieldError, SignupField, SignupForm};
pub use payment::PaymentService;
pub use query::{filter_transactions, LedgerFilter};
pub use session::{RestoreOutcome, SessionService, SessionState};
