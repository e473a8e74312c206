//! HTTP client for the classification service

use std::time::Duration;

use async_trait::async_trait;
use domain::ClassifierVerdict;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ClassifierConfig,
    error::ClassifierError,
    ports::{PredictRequest, PredictResponse, SpamClassifier},
};

/// Text sent by the health probe
const HEALTH_PROBE_TEXT: &str = "health check";

/// Classifier reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HttpClassifier {
    /// Create a new client
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClassifierError::ConnectionFailed(e.to_string()))?;

        info!(
            url = %config.predict_url(),
            timeout_ms = config.timeout_ms,
            "Initialized classifier client"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, ClassifierError> {
        Self::new(ClassifierConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Message of a failed response: the JSON `error` field when present, else the raw body
    fn failure_message(body: &str) -> String {
        serde_json::from_str::<PredictResponse>(body)
            .ok()
            .and_then(|r| r.error_message())
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl SpamClassifier for HttpClassifier {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn predict(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError> {
        debug!("Sending prediction request");

        let response = self
            .client
            .post(self.config.predict_url())
            .json(&PredictRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Prediction request failed");
            return Err(ClassifierError::ServerError {
                status: status.as_u16(),
                message: Self::failure_message(&body),
            });
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        let verdict = body.into_verdict()?;
        debug!(
            predicted = %verdict.predicted,
            spam_probability = verdict.spam_probability(),
            "Prediction received"
        );
        Ok(verdict)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> bool {
        let response = self
            .client
            .post(self.config.predict_url())
            .json(&PredictRequest::new(HEALTH_PROBE_TEXT))
            .timeout(Duration::from_millis(self.config.health_timeout_ms))
            .send()
            .await;

        match response {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Classifier health probe failed");
                false
            },
        }
    }
}
