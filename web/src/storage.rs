//! Local-storage abstraction.
//!
//! The router never touches `window.localStorage` directly; it reads
//! and writes through [`Storage`] so tests (and native hosts) can use
//! [`MemoryStorage`]. On wasm targets [`LocalStorage`] binds the trait
//! to the real browser store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key for the login flag: `"true"` when logged in, absent otherwise.
/// Set by the login page on success, cleared only by logout. A UI gate
/// with no security value; the backend knows nothing about it.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";

/// Key for the cached account summary. Survives logout so a returning
/// user can log back in without retyping everything.
pub const USER_DATA_KEY: &str = "userData";

/// String key-value persistence, the shape of browser local storage.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory storage for tests and native hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Account summary cached at login time, stored as JSON under
/// [`USER_DATA_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// Read the cached account summary; malformed entries read as absent.
pub fn cached_user(storage: &dyn Storage) -> Option<CachedUser> {
    storage
        .get(USER_DATA_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

/// Cache the account summary for the profile form.
pub fn cache_user(storage: &mut dyn Storage, user: &CachedUser) {
    if let Ok(raw) = serde_json::to_string(user) {
        storage.set(USER_DATA_KEY, &raw);
    }
}

/// Mark the session as logged in.
pub fn set_logged_in(storage: &mut dyn Storage) {
    storage.set(IS_LOGGED_IN_KEY, "true");
}

#[cfg(target_arch = "wasm32")]
mod local {
    use super::Storage;

    /// Browser `localStorage` binding.
    pub struct LocalStorage {
        inner: web_sys::Storage,
    }

    impl LocalStorage {
        /// `None` when local storage is unavailable (sandboxed page,
        /// storage disabled).
        pub fn new() -> Option<Self> {
            let inner = web_sys::window()?.local_storage().ok()??;
            Some(Self { inner })
        }
    }

    impl Storage for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) {
            let _ = self.inner.set_item(key, value);
        }

        fn remove(&mut self, key: &str) {
            let _ = self.inner.remove_item(key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
