//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body mode is not one of `raw`, `form` or `urlencoded`.
    #[error("unsupported body mode: {0}")]
    UnsupportedBodyMode(String),

    /// The theme name is not `light` or `dark`.
    #[error("unsupported theme: {0}")]
    UnsupportedTheme(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
