//! Client-side persistence for the session token.
//!
//! Everything that survives a page reload goes through the [`TokenStore`] trait,
//! so the session logic runs unchanged against browser `localStorage` on the web
//! and against [`MemoryStore`] in tests and native builds.

pub mod error;
pub mod token;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use error::StoreError;
pub use token::{TokenStore, ACCESS_TOKEN_KEY};
