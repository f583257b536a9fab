//! Audit logging for PaySphere
//!
//! Records transaction creation and session transitions (login, signup,
//! logout) in an append-only JSONL audit log.
//!
//! - `AuditEntry`: a single entry with timestamp, operation and entity
//!   information, plus a JSON snapshot for created transactions.
//! - `AuditLogger`: appends entries to the log file, one JSON object per line.
//!
//! A failed audit write never undoes the operation it describes; callers log
//! a warning and carry on.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
