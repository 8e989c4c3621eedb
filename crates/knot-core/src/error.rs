use thiserror::Error;

/// Result type for core validation operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation failures raised when constructing domain values.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid full url: {0}")]
    InvalidFullUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Failures raised by a [`UrlStore`][crate::store::UrlStore] backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}
