//! Persistent key-value storage.
//!
//! The application keeps exactly three values: the current user, the
//! credential registry and the library. Each is stored as one JSON document
//! under a fixed key and is always overwritten as a whole.

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

pub const CURRENT_USER_KEY: &str = "current_user";
pub const USER_REGISTRY_KEY: &str = "user_registry";
pub const LIBRARY_KEY: &str = "library";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value. A missing key is `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_vec(value)?;
    store.set(key, &json)
}

// ============================================================================
// Sled
// ============================================================================

pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db.insert(key.as_bytes(), value)?;
        // Writes are unbatched; a mutation is durable before the handler returns.
        self.db.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db.remove(key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn temp_sled() -> SledStore {
        SledStore::from_db(sled::Config::new().temporary(true).open().unwrap())
    }

    #[test]
    fn test_sled_missing_key_is_none() {
        let store = temp_sled();
        let user: Option<User> = load_json(&store, CURRENT_USER_KEY).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_sled_save_and_load_json() {
        let store = temp_sled();
        let user = User::named("amina");
        save_json(&store, CURRENT_USER_KEY, &user).unwrap();

        let loaded: User = load_json(&store, CURRENT_USER_KEY).unwrap().unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn test_sled_remove() {
        let store = temp_sled();
        store.set(CURRENT_USER_KEY, b"{}").unwrap();
        store.remove(CURRENT_USER_KEY).unwrap();
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set(LIBRARY_KEY, b"[1]").unwrap();
        store.set(LIBRARY_KEY, b"[2]").unwrap();
        assert_eq!(store.get(LIBRARY_KEY).unwrap().unwrap(), b"[2]".to_vec());
    }

    #[test]
    fn test_load_json_rejects_garbage() {
        let store = MemoryStore::new();
        store.set(CURRENT_USER_KEY, b"not json").unwrap();
        let result: Result<Option<User>> = load_json(&store, CURRENT_USER_KEY);
        assert!(result.is_err());
    }
}
