//! Error types for the character store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
///
/// Display strings double as the wire-facing error messages, so the
/// wording here is part of the HTTP contract.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record with the requested id
    #[error("Character not found")]
    NotFound,

    /// Insert candidate is missing a required field
    #[error("Missing requirement: {0}")]
    MissingRequirement(&'static str),

    /// Insert candidate is not a JSON object
    #[error("Character must be a JSON object")]
    NotAnObject,

    /// Writing the roster document failed; the in-memory mutation was
    /// rolled back before this error was returned
    #[error("Failed to persist roster: {0}")]
    Persistence(String),

    /// Malformed roster document on load
    #[error("Malformed roster document: {0}")]
    Malformed(String),

    /// Internal error (lock poisoned)
    #[error("Internal error: {0}")]
    Internal(String),
}
