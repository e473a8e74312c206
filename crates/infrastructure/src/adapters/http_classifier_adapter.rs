//! HTTP classifier adapter - Implements ClassifierPort using ai_classifier
//!
//! Every call goes through the retry helper; only transient failures are retried.

use ai_classifier::{ClassifierConfig, ClassifierError, HttpClassifier, SpamClassifier};
use application::{error::ApplicationError, ports::ClassifierPort};
use async_trait::async_trait;
use domain::ClassifierVerdict;
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, with_retry};

/// Adapter for the HTTP classification service
#[derive(Debug)]
pub struct HttpClassifierAdapter {
    client: HttpClassifier,
    retry: RetryConfig,
}

impl HttpClassifierAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: ClassifierConfig, retry: RetryConfig) -> Result<Self, ApplicationError> {
        let client = HttpClassifier::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client, retry })
    }

    /// Convert ai_classifier error to application error
    fn map_error(e: ClassifierError) -> ApplicationError {
        match e {
            ClassifierError::Rejected(msg) => ApplicationError::ClassifierRejected(msg),
            ClassifierError::ServerError { status, message } if status < 500 => {
                ApplicationError::ClassifierRejected(format!("status {status}: {message}"))
            },
            other => ApplicationError::ClassifierUnavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl ClassifierPort for HttpClassifierAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn classify(&self, text: &str) -> Result<ClassifierVerdict, ApplicationError> {
        let (result, attempts) = with_retry(&self.retry, || self.client.predict(text)).await;
        debug!(attempts, ok = result.is_ok(), "Classifier call finished");
        result.map_err(Self::map_error)
    }

    async fn is_healthy(&self) -> bool {
        self.client.health_check().await
    }
}
