//! Storage layer for PaySphere
//!
//! Holds the in-memory transaction ledger and the persistence boundary for
//! the authenticated principal, plus the JSON file helpers both rely on.

pub mod file_io;
pub mod identity;
pub mod kv;
pub mod seed;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use identity::{IdentityStore, KeyValueIdentityStore};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use transactions::TransactionLedger;
