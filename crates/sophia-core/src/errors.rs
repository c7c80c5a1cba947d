//! Cross-cutting error types for Sophia.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `AiError`) are defined in
//! their respective crates. A unified error is deferred to `sophia-cli`
//! where all crate errors converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Sophia crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result (or belongs to another user).
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (lengths, formats, criteria syntax).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness rule was violated (username, email, badge slug).
    #[error("{0}")]
    Conflict(String),

    /// Credentials did not match.
    #[error("{0}")]
    AuthFailed(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`].
    #[must_use]
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}
