//! Common error types for the closet workspace

use thiserror::Error;

/// Common result type for closet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, the closet core and the HTTP layer
///
/// Ownership mismatches are reported as `NotFound` so that callers cannot
/// probe for the existence of another user's items or outfits.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No matching owner-scoped item, outfit or user
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or empty submission
    #[error("Validation error: {0}")]
    Validation(String),

    /// Programming-contract violation (e.g. selecting from an empty set)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Identity could not be established (bad credentials or session)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
