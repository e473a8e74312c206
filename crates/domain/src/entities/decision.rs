//! Final classification decision

use serde::Serialize;

use super::{signal_set::SignalSet, verdict::ClassifierVerdict};
use crate::value_objects::Classification;

/// Outcome of reconciling a classifier verdict with authentication signals
///
/// Created once per evaluated email and never mutated; fields are only
/// reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    classification: Classification,
    verdict: ClassifierVerdict,
    signals: SignalSet,
    overridden: bool,
}

impl Decision {
    /// Record a decision.
    ///
    /// `overridden` is derived: it is true exactly when the final classification
    /// differs from the classifier's predicted class.
    #[must_use]
    pub fn new(
        classification: Classification,
        verdict: ClassifierVerdict,
        signals: SignalSet,
    ) -> Self {
        let overridden = classification != verdict.predicted;
        Self {
            classification,
            verdict,
            signals,
            overridden,
        }
    }

    /// Final classification after the authentication override
    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    /// Class the upstream classifier predicted
    #[must_use]
    pub const fn predicted(&self) -> Classification {
        self.verdict.predicted
    }

    #[must_use]
    pub const fn verdict(&self) -> &ClassifierVerdict {
        &self.verdict
    }

    #[must_use]
    pub const fn signals(&self) -> &SignalSet {
        &self.signals
    }

    /// Whether the final classification differs from the predicted class
    #[must_use]
    pub const fn overridden(&self) -> bool {
        self.overridden
    }
}
