//! # localStorage token store — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`TokenStore`] used on the **web platform**. It keeps
//! the bearer token in `window.localStorage`, so a session survives page reloads.
//!
//! Like the rest of the web storage API this is synchronous. The store is a
//! zero-size handle that looks up `localStorage` on every call.

use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StoreError;
use crate::token::TokenStore;

/// `window.localStorage`-backed TokenStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Operation(format!("{value:?}"))
}

impl TokenStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            warn!("localStorage rejected write for key {key}");
            js_error(e)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
