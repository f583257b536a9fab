//! PaySphere - session, payment ledger and analytics core
//!
//! This library is the non-UI core of the PaySphere payments dashboard. It
//! keeps the authenticated session, records sent and requested payments in
//! a newest-first ledger, and derives search results and analytics from
//! ledger snapshots.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (principal, transactions, money, ids)
//! - `storage`: Key-value persistence, the identity store and the ledger
//! - `services`: Session, credentials, payments and ledger queries
//! - `reports`: Totals, category breakdowns and monthly series
//! - `audit`: Audit logging system
//! - `context`: Composition root tying the above together
//!
//! No tracing subscriber is installed here; the embedding application
//! chooses one.
//!
//! # Example
//!
//! ```rust,ignore
//! use paysphere::config::PaySpherePaths;
//! use paysphere::context::CoreContext;
//!
//! let mut core = CoreContext::open(PaySpherePaths::new()?)?;
//! core.restore_session();
//! core.session_mut().login("john.doe@example.com", "password123")?;
//! core.payments().send_payment("Alice", "42.50", Some("Lunch"))?;
//! let summary = core.dashboard()?;
//! ```

pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PaySphereError, PaySphereResult};
