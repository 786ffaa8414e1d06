use thiserror::Error;

/// Failures raised by a [`crate::TokenStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing storage is not available (no `window`, storage disabled, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected the operation (quota exceeded, security error, ...).
    #[error("storage operation failed: {0}")]
    Operation(String),
}
