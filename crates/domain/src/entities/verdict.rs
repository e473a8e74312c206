//! Output of the external probabilistic classifier

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::Classification};

/// Tolerance for the probability vector summing to 1
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;

/// Verdict returned by the classifier service
///
/// Treated as trusted input by the decision engine. `validate_shape` is the
/// caller-side check for a malformed probability vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    /// Predicted class
    pub predicted: Classification,
    /// Probability per class index: `[not_spam, spam]`
    pub probabilities: Vec<f64>,
    /// Sender blacklist weight, when the service reports one
    #[serde(default)]
    pub blacklist_weight: Option<f64>,
    /// Suspicious links flagged by the service
    #[serde(default)]
    pub link_anomalies: Vec<String>,
}

impl ClassifierVerdict {
    /// Create a verdict from a predicted class and its probability vector
    #[must_use]
    pub fn new(predicted: Classification, probabilities: Vec<f64>) -> Self {
        Self {
            predicted,
            probabilities,
            blacklist_weight: None,
            link_anomalies: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_blacklist_weight(mut self, weight: f64) -> Self {
        self.blacklist_weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_link_anomalies(mut self, anomalies: Vec<String>) -> Self {
        self.link_anomalies = anomalies;
        self
    }

    /// Probability assigned to a class, 0.0 when the vector is too short
    #[must_use]
    pub fn probability_of(&self, class: Classification) -> f64 {
        self.probabilities
            .get(class.class_index())
            .copied()
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn spam_probability(&self) -> f64 {
        self.probability_of(Classification::Spam)
    }

    #[must_use]
    pub fn not_spam_probability(&self) -> f64 {
        self.probability_of(Classification::NotSpam)
    }

    /// Check the probability vector shape: two finite, non-negative entries
    /// summing to 1 within tolerance.
    pub fn validate_shape(&self) -> Result<(), DomainError> {
        if self.probabilities.len() != 2 {
            return Err(DomainError::invalid_verdict(format!(
                "expected 2 probabilities, got {}",
                self.probabilities.len()
            )));
        }

        if let Some(bad) = self
            .probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(DomainError::invalid_verdict(format!(
                "probability {bad} is negative or not finite"
            )));
        }

        let sum: f64 = self.probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(DomainError::invalid_verdict(format!(
                "probabilities sum to {sum}, expected 1"
            )));
        }

        Ok(())
    }
}
