//! Identity store: persistence for the single authenticated principal
//!
//! Layout in the underlying key-value store:
//!
//! - `isAuthenticated`: the literal string `"true"` while a session exists
//! - `user`: the serialized [`Principal`]
//!
//! No validation happens here. This is only the persistence boundary.

use crate::error::PaySphereError;
use crate::models::Principal;

use super::kv::KeyValueStore;

pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const USER_KEY: &str = "user";

/// Persists and retrieves the authenticated principal
pub trait IdentityStore {
    /// Persist the full record, overwriting any previous one
    fn save(&mut self, principal: &Principal) -> Result<(), PaySphereError>;

    /// The previously saved principal, or `None` if absent or cleared
    fn load(&self) -> Result<Option<Principal>, PaySphereError>;

    /// Remove the principal and the authenticated marker
    fn clear(&mut self) -> Result<(), PaySphereError>;
}

/// [`IdentityStore`] over any [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct KeyValueIdentityStore<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueIdentityStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the backing store
    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: KeyValueStore> IdentityStore for KeyValueIdentityStore<S> {
    fn save(&mut self, principal: &Principal) -> Result<(), PaySphereError> {
        let json = serde_json::to_string(principal).map_err(|e| {
            PaySphereError::Storage(format!("Failed to serialize principal: {}", e))
        })?;

        // Record before marker: an interrupted save never looks authenticated
        self.store.set(USER_KEY, &json)?;
        self.store.set(AUTHENTICATED_KEY, "true")
    }

    fn load(&self) -> Result<Option<Principal>, PaySphereError> {
        if self.store.get(AUTHENTICATED_KEY)?.as_deref() != Some("true") {
            return Ok(None);
        }

        let Some(json) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| PaySphereError::Storage(format!("Stored principal is corrupt: {}", e)))
    }

    fn clear(&mut self) -> Result<(), PaySphereError> {
        self.store.remove(AUTHENTICATED_KEY)?;
        self.store.remove(USER_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::{JsonFileStore, MemoryStore};
    use crate::storage::seed;
    use tempfile::TempDir;

    #[test]
    fn test_load_empty_is_absent() {
        let store = KeyValueIdentityStore::new(MemoryStore::new());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = KeyValueIdentityStore::new(MemoryStore::new());
        let principal = seed::demo_principal();

        store.save(&principal).unwrap();
        assert_eq!(store.load().unwrap(), Some(principal));
        assert_eq!(
            store.inner().get(AUTHENTICATED_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = KeyValueIdentityStore::new(MemoryStore::new());
        let first = seed::demo_principal();
        let second = Principal::from_template(&first, "Jane Roe", "jane@example.com");

        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert_eq!(store.load().unwrap(), Some(second));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut store = KeyValueIdentityStore::new(MemoryStore::new());
        store.save(&seed::demo_principal()).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(store.inner().is_empty());
    }

    #[test]
    fn test_marker_required() {
        let mut store = KeyValueIdentityStore::new(MemoryStore::new());
        let json = serde_json::to_string(&seed::demo_principal()).unwrap();
        store.inner_mut().set(USER_KEY, &json).unwrap();
        assert_eq!(store.load().unwrap(), None);

        store.inner_mut().set(AUTHENTICATED_KEY, "yes").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_user_record() {
        let mut store = KeyValueIdentityStore::new(MemoryStore::new());
        store.inner_mut().set(AUTHENTICATED_KEY, "true").unwrap();
        store.inner_mut().set(USER_KEY, "{\"name\":").unwrap();

        assert!(matches!(store.load(), Err(PaySphereError::Storage(_))));
    }

    #[test]
    fn test_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let mut store = KeyValueIdentityStore::new(JsonFileStore::new(path.clone()));
        store.save(&seed::demo_principal()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["isAuthenticated"], "true");

        let user: serde_json::Value =
            serde_json::from_str(raw["user"].as_str().unwrap()).unwrap();
        assert_eq!(user["email"], "john.doe@example.com");
        assert_eq!(user["balance"], serde_json::json!(12450.75));
        assert_eq!(user["accountNumber"], "****1234");
    }
}
