//! Application-level errors

use domain::{DomainError, FailureKind};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input record or batch is unusable
    #[error("Malformed input: {0}")]
    InputMalformed(String),

    /// Classifier service failed, timed out or refused the request
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Classifier rejected the input with an explicit error
    #[error("Classifier rejected input: {0}")]
    ClassifierRejected(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ClassifierUnavailable(_))
    }

    /// Per-item failure category used by the batch pipeline
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Domain(DomainError::InvalidVerdict(_) | DomainError::UnknownClass(_)) => {
                FailureKind::InvalidVerdict
            },
            Self::Domain(_) | Self::InputMalformed(_) => FailureKind::InputMalformed,
            Self::ClassifierUnavailable(_) | Self::ClassifierRejected(_) => {
                FailureKind::ClassifierUnavailable
            },
            Self::Configuration(_) | Self::Internal(_) => FailureKind::Internal,
        }
    }
}
