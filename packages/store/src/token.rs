//! # Token store — where the bearer token lives between requests
//!
//! A [`TokenStore`] is a tiny string key/value store. The session service writes the
//! bearer token under [`ACCESS_TOKEN_KEY`] after login or signup, the API client reads
//! it before every protected request, and logout removes it.
//!
//! Implementations:
//!
//! | Type | Platform | Backing |
//! |------|----------|---------|
//! | [`crate::MemoryStore`] | any | `HashMap` behind a mutex, shared across clones |
//! | `LocalStorageStore` | wasm + `web` feature | `window.localStorage` |

use crate::error::StoreError;

/// Key the access token is persisted under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Synchronous string storage for session data.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
