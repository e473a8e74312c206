//! Classifier client errors

use thiserror::Error;

/// Errors that can occur while calling the classification service
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Failed to connect to the classification server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the classification server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request did not complete in time
    #[error("Classifier timeout: {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("Server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Response body could not be interpreted
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server answered successfully but reported an error for the input
    #[error("Rejected by classifier: {0}")]
    Rejected(String),
}

impl ClassifierError {
    /// Transient failures worth another attempt
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout(_) => true,
            Self::ServerError { status, .. } => *status >= 500,
            Self::RequestFailed(_) | Self::InvalidResponse(_) | Self::Rejected(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
