//! # Session flags: browser-local login state
//!
//! The dashboard has no server-issued token. A successful login stores two
//! keys in browser-local storage and every guarded page checks them:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`USER_KEY`] (`"user"`) | JSON-serialised profile of the logged-in user |
//! | [`AUTHENTICATED_KEY`] (`"isAuthenticated"`) | `"true"`, absent when logged out |
//!
//! There is no expiry or refresh; logging out removes both keys.
//!
//! Storage goes through the [`SessionStore`] trait so the same [`Session`] logic
//! runs against `localStorage` in the browser ([`crate::LocalStorageStore`]) and
//! against [`crate::MemorySessionStore`] in tests.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::StoreError;

/// Key holding the serialised session user.
pub const USER_KEY: &str = "user";

/// Key holding the authenticated flag.
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";

/// Synchronous string key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

/// Login state persisted in a [`SessionStore`].
#[derive(Clone, Debug)]
pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether the authenticated flag is exactly `"true"`.
    pub fn is_authenticated(&self) -> bool {
        self.store.get(AUTHENTICATED_KEY).as_deref() == Some("true")
    }

    /// Persist the user profile and raise the authenticated flag.
    pub fn login<U: Serialize>(&self, user: &U) -> Result<(), StoreError> {
        let profile = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &profile)?;
        self.store.set(AUTHENTICATED_KEY, "true")?;
        tracing::info!("Session started");
        Ok(())
    }

    /// The stored profile, if any. A corrupt profile reads as `None`.
    pub fn user<U: DeserializeOwned>(&self) -> Option<U> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable session profile: {}", e);
                None
            }
        }
    }

    /// Remove both session keys.
    pub fn logout(&self) {
        self.store.remove(USER_KEY);
        self.store.remove(AUTHENTICATED_KEY);
        tracing::info!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySessionStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        #[serde(rename = "FirstName")]
        first_name: String,
    }

    #[test]
    fn test_login_sets_both_keys() {
        let store = MemorySessionStore::new();
        let session = Session::new(store.clone());

        assert!(!session.is_authenticated());
        assert!(session.user::<Profile>().is_none());

        session
            .login(&Profile {
                first_name: "Maria".to_string(),
            })
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(store.get(AUTHENTICATED_KEY).as_deref(), Some("true"));
        assert_eq!(store.get(USER_KEY).as_deref(), Some(r#"{"FirstName":"Maria"}"#));
        assert_eq!(session.user::<Profile>().unwrap().first_name, "Maria");
    }

    #[test]
    fn test_logout_removes_both_keys() {
        let store = MemorySessionStore::new();
        let session = Session::new(store.clone());
        session
            .login(&Profile {
                first_name: "Ana".to_string(),
            })
            .unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(store.get(USER_KEY).is_none());
        assert!(store.get(AUTHENTICATED_KEY).is_none());
    }

    #[test]
    fn test_flag_must_be_exactly_true() {
        let store = MemorySessionStore::new();
        store.set(AUTHENTICATED_KEY, "yes").unwrap();
        assert!(!Session::new(store).is_authenticated());
    }

    #[test]
    fn test_corrupt_profile_reads_as_none() {
        let store = MemorySessionStore::new();
        store.set(USER_KEY, "{not json").unwrap();
        store.set(AUTHENTICATED_KEY, "true").unwrap();
        let session = Session::new(store);
        assert!(session.is_authenticated());
        assert!(session.user::<Profile>().is_none());
    }
}
