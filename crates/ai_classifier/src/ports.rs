//! Port definitions for the classification service
//!
//! Wire types of `POST /predict` and the trait clients implement.

use async_trait::async_trait;
use domain::{Classification, ClassifierVerdict};
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Request body of the prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

impl PredictRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Response body of the prediction endpoint
///
/// Every field is optional on the wire; a successful answer carries
/// `predicted_class` and `probabilities`, a failed one carries `error` and
/// possibly `details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predicted_class: Option<i64>,
    #[serde(default)]
    pub probabilities: Option<Vec<f64>>,
    #[serde(default)]
    pub blacklist_weight: Option<f64>,
    #[serde(default)]
    pub link_anomalies: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl PredictResponse {
    /// Error text including details, if the response reports an error
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|error| match &self.details {
            Some(details) => format!("{error}: {details}"),
            None => error.clone(),
        })
    }

    /// Convert into a domain verdict
    ///
    /// An `error` field is a rejection even when the other fields are present.
    /// The probability vector is passed through unvalidated.
    pub fn into_verdict(self) -> Result<ClassifierVerdict, ClassifierError> {
        if let Some(message) = self.error_message() {
            return Err(ClassifierError::Rejected(message));
        }

        let class = self.predicted_class.ok_or_else(|| {
            ClassifierError::InvalidResponse("missing predicted_class".to_string())
        })?;
        let predicted = Classification::from_class_index(class)
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
        let probabilities = self.probabilities.ok_or_else(|| {
            ClassifierError::InvalidResponse("missing probabilities".to_string())
        })?;

        let mut verdict = ClassifierVerdict::new(predicted, probabilities)
            .with_link_anomalies(self.link_anomalies.unwrap_or_default());
        if let Some(weight) = self.blacklist_weight {
            verdict = verdict.with_blacklist_weight(weight);
        }
        Ok(verdict)
    }
}

/// Client of the classification service
#[async_trait]
pub trait SpamClassifier: Send + Sync {
    /// Classify raw email text
    async fn predict(&self, text: &str) -> Result<ClassifierVerdict, ClassifierError>;

    /// Whether the service answers at all
    async fn health_check(&self) -> bool;
}
