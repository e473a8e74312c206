//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Classifier verdict does not have the expected probability shape
    #[error("Invalid classifier verdict: {0}")]
    InvalidVerdict(String),

    /// Predicted class index outside the binary label space
    #[error("Unknown class index: {0}")]
    UnknownClass(i64),

    /// Email record without usable content
    #[error("Email record has no content")]
    MissingContent,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid verdict error
    pub fn invalid_verdict(reason: impl Into<String>) -> Self {
        Self::InvalidVerdict(reason.into())
    }
}
