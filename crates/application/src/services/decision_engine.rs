//! Decision engine - authentication override
//!
//! When at least `safe_threshold` tracked protocols report [`AuthSignal::Safe`],
//! the final classification is forced to [`Classification::NotSpam`] regardless
//! of the classifier's prediction. Below the threshold the prediction stands.
//! This is a hard override, not a probability blend.
//!
//! [`AuthSignal::Safe`]: domain::AuthSignal::Safe

use domain::{Classification, ClassifierVerdict, Decision, SignalSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Spam probability at or above which an override is logged as a warning
pub const HIGH_CONFIDENCE_SPAM: f64 = 0.9;

/// Override policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverridePolicy {
    /// Minimum number of Safe signals that forces "not spam"
    pub safe_threshold: usize,
}

impl Default for OverridePolicy {
    fn default() -> Self {
        Self { safe_threshold: 3 }
    }
}

/// Reconciles classifier verdicts with authentication signals
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    policy: OverridePolicy,
}

impl DecisionEngine {
    #[must_use]
    pub const fn new(policy: OverridePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> OverridePolicy {
        self.policy
    }

    /// Produce the final decision; pure apart from logging, cannot fail
    #[must_use]
    pub fn decide(&self, verdict: ClassifierVerdict, signals: SignalSet) -> Decision {
        let safe_count = signals.safe_count();
        let classification = if safe_count >= self.policy.safe_threshold {
            Classification::NotSpam
        } else {
            verdict.predicted
        };

        let overridden = classification != verdict.predicted;
        if overridden && verdict.spam_probability() >= HIGH_CONFIDENCE_SPAM {
            warn!(
                safe_count,
                spam_probability = verdict.spam_probability(),
                "Authentication override applied to a high-confidence spam verdict"
            );
        } else {
            debug!(safe_count, overridden, "Decision made");
        }

        Decision::new(classification, verdict, signals)
    }
}
