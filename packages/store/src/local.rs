//! # `localStorage` session store: browser-side persistence
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the web platform. It
//! looks up `window.localStorage` on every call instead of caching a handle;
//! the browser keeps the storage object alive and the lookup is cheap.
//!
//! Reads and removals swallow errors (storage disabled, private mode), so an
//! unavailable store behaves like an empty one and the dashboard falls back to
//! the login page. Writes report [`StoreError::Unavailable`] so the login flow
//! can tell the user.

use web_sys::Storage;

use crate::session::SessionStore;
use crate::StoreError;

/// `window.localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!("Failed to remove {} from localStorage: {:?}", key, e);
            }
        }
    }
}
