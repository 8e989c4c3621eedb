use knot_core::{CoreError, StoreError};
use thiserror::Error;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("store error: {0}")]
    Storage(#[from] StoreError),
}

impl From<CoreError> for ServiceError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidFullUrl(message) | CoreError::InvalidShortCode(message) => {
                Self::InvalidInput(message)
            }
        }
    }
}
