//! Custom error types for PaySphere
//!
//! This module defines the error hierarchy for the core using thiserror
//! for ergonomic error definitions. Every failure is an explicit result the
//! calling UI layer decides how to present; nothing here is fatal.

use thiserror::Error;

/// The main error type for PaySphere operations
#[derive(Error, Debug)]
pub enum PaySphereError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed command input (empty counterparty, bad amount, form errors)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential mismatch on login
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Persistence errors (store unavailable, corrupt record, poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PaySphereError {
    /// The single credential failure reported by login.
    ///
    /// Deliberately identical for a wrong email and a wrong password.
    pub fn invalid_credentials() -> Self {
        Self::Authentication("Invalid credentials".into())
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PaySphereError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PaySphereError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PaySphere operations
pub type PaySphereResult<T> = Result<T, PaySphereError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PaySphereError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_credentials() {
        let err = PaySphereError::invalid_credentials();
        assert_eq!(err.to_string(), "Authentication error: Invalid credentials");
        assert!(err.is_authentication());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = PaySphereError::transaction_not_found("txn-42");
        assert_eq!(err.to_string(), "Transaction not found: txn-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PaySphereError = io_err.into();
        assert!(matches!(err, PaySphereError::Io(_)));
    }
}
