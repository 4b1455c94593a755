//! Application error types

use thiserror::Error;

use crate::ports::StoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A persistent store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// A value could not be encoded for the persistent store.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The tab already has a request in flight.
    #[error("request already in flight: {0}")]
    Busy(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
