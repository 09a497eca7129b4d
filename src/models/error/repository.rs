use thiserror::Error;

use crate::models::ApiError;

/// Failures reported by the record store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Failed to reach the store: {0}")]
    ConnectionError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("An unknown store error occurred: {0}")]
    Other(String),
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}
