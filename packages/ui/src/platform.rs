use std::sync::Arc;

use store::TokenStore;

/// Token store for the current platform: `localStorage` in the browser,
/// process memory everywhere else.
pub fn make_token_store() -> Arc<dyn TokenStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Arc::new(store::MemoryStore::new())
    }
}

/// Sleep that works on both the browser event loop and tokio.
pub(crate) async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
