use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::token::TokenStore;

/// In-memory TokenStore for testing and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an access token, as if a previous session left one behind.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(crate::ACCESS_TOKEN_KEY.to_string(), token.to_string());
        store
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Operation(e.to_string()))
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
