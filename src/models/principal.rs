//! Principal model
//!
//! The authenticated user's account record. Its serialized form is the
//! `user` record kept by the identity store, so field names follow that
//! layout (`name`, `accountNumber`, decimal `balance`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PrincipalId;
use super::money::{self, Money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: PrincipalId,

    /// Display name
    pub name: String,

    /// Unique within the system
    pub email: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar: String,

    /// Signed account balance
    #[serde(with = "money::as_decimal")]
    pub balance: Money,

    /// Masked account number for display, e.g. `****1234`
    pub account_number: String,
}

impl Principal {
    /// Derive a new principal from a template, replacing identity fields.
    ///
    /// The balance, avatar and masked account number are carried over from
    /// the template; a fresh id is assigned.
    pub fn from_template(
        template: &Principal,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: PrincipalId::new(),
            name: name.into(),
            email: email.into(),
            ..template.clone()
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Principal {
        Principal {
            id: PrincipalId::new(),
            name: "John Doe".into(),
            email: "john.doe@example.com".into(),
            avatar: "https://example.com/avatar.png".into(),
            balance: Money::from_cents(1245075),
            account_number: "****1234".into(),
        }
    }

    #[test]
    fn test_from_template() {
        let base = template();
        let derived = Principal::from_template(&base, "Jane Roe", "jane@example.com");

        assert_ne!(derived.id, base.id);
        assert_eq!(derived.name, "Jane Roe");
        assert_eq!(derived.email, "jane@example.com");
        assert_eq!(derived.balance, base.balance);
        assert_eq!(derived.account_number, "****1234");
    }

    #[test]
    fn test_serialized_layout() {
        let json = serde_json::to_value(template()).unwrap();
        let obj = json.as_object().unwrap();

        for key in ["id", "name", "email", "avatar", "balance", "accountNumber"] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(json["balance"], serde_json::json!(12450.75));
        assert_eq!(json["accountNumber"], "****1234");
    }

    #[test]
    fn test_round_trip_keeps_cents_exact() {
        let original = template();
        let json = serde_json::to_string(&original).unwrap();
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_display() {
        assert_eq!(template().to_string(), "John Doe <john.doe@example.com>");
    }
}
