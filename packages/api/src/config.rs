//! # Client configuration
//!
//! [`ClientConfig`] tells the [`crate::ApiClient`] where the member service lives and
//! where the session token is persisted.
//!
//! ## Sources
//!
//! | Setting | Build time | Run time (native only) | Default |
//! |---------|-----------|------------------------|---------|
//! | `base_url` | `API_BASE_URL` | `API_BASE_URL` | `http://localhost:8080` |
//! | `token_key` | — | `API_TOKEN_KEY` | `access_token` |
//! | `request_timeout_secs` | — | `API_REQUEST_TIMEOUT_SECS` | none (transport default) |
//!
//! The browser has no process environment, so the web build bakes `API_BASE_URL`
//! in with `option_env!`. Native builds (tests, tooling) additionally read a `.env`
//! file through `dotenvy` and let the process environment override the baked value.

use serde::{Deserialize, Serialize};

/// Fallback base URL when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for the member API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme + host (+ port) of the API server, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Storage key the bearer token is persisted under.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Per-request timeout. Ignored on wasm, where the browser decides.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    option_env!("API_BASE_URL")
        .map(normalize_base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn default_token_key() -> String {
    store::ACCESS_TOKEN_KEY.to_string()
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_key: default_token_key(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Build-time configuration, overridden by the process environment on native targets.
    pub fn from_env() -> Self {
        #[allow(unused_mut)]
        let mut config = Self::default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();

            if let Ok(url) = std::env::var("API_BASE_URL") {
                config.base_url = normalize_base_url(&url);
            }
            if let Ok(key) = std::env::var("API_TOKEN_KEY") {
                config.token_key = key;
            }
            if let Ok(secs) = std::env::var("API_REQUEST_TIMEOUT_SECS") {
                match secs.parse() {
                    Ok(secs) => config.request_timeout_secs = Some(secs),
                    Err(_) => tracing::warn!("ignoring invalid API_REQUEST_TIMEOUT_SECS={secs}"),
                }
            }
        }

        config
    }

    /// Builder method to point the client at another server.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = normalize_base_url(url);
        self
    }

    /// Builder method to change the token storage key.
    pub fn with_token_key(mut self, key: &str) -> Self {
        self.token_key = key.to_string();
        self
    }

    /// Builder method to set a request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Absolute URL for an API path such as `/api/v1/members`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
