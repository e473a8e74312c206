//! Decision policy and batch limits

use application::{
    ApplicationError,
    services::{OverridePolicy, SignalExtractor, SignalRule},
};
use serde::{Deserialize, Serialize};

/// Authentication override policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Safe signals needed to force "not spam"
    #[serde(default = "default_safe_threshold")]
    pub safe_threshold: usize,

    /// Ordered rule table, one entry per protocol
    #[serde(default = "SignalRule::defaults")]
    pub rules: Vec<SignalRule>,
}

const fn default_safe_threshold() -> usize {
    3
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            safe_threshold: default_safe_threshold(),
            rules: SignalRule::defaults(),
        }
    }
}

impl PolicyConfig {
    #[must_use]
    pub const fn override_policy(&self) -> OverridePolicy {
        OverridePolicy {
            safe_threshold: self.safe_threshold,
        }
    }

    /// Threshold must be reachable and every pattern must compile
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let extractor = SignalExtractor::new(&self.rules)?;

        if self.safe_threshold == 0 || self.safe_threshold > extractor.protocol_count() {
            return Err(ApplicationError::Configuration(format!(
                "policy.safe_threshold must be between 1 and {} (got {})",
                extractor.protocol_count(),
                self.safe_threshold
            )));
        }
        Ok(())
    }
}

/// Batch processing limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Largest accepted batch; unlimited when unset
    #[serde(default)]
    pub max_items: Option<usize>,
}
