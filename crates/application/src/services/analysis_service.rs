//! Analysis service - one email through the decision layer
//!
//! Extract signals, classify, validate the verdict shape, decide, fingerprint.

use std::{fmt, sync::Arc};

use domain::{AnalyzedEmail, EmailRecord, SignalSet};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::ClassifierPort,
    services::{
        decision_engine::DecisionEngine, fingerprinter::fingerprint,
        signal_extractor::SignalExtractor,
    },
};

/// Service analysing single emails
pub struct AnalysisService {
    classifier: Arc<dyn ClassifierPort>,
    extractor: SignalExtractor,
    engine: DecisionEngine,
}

impl fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("protocols", &self.extractor.protocol_count())
            .field("policy", &self.engine.policy())
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// Create a service with the built-in rule table and default policy
    pub fn new(classifier: Arc<dyn ClassifierPort>) -> Self {
        Self {
            classifier,
            extractor: SignalExtractor::default(),
            engine: DecisionEngine::default(),
        }
    }

    /// Replace the signal rule table
    #[must_use]
    pub fn with_extractor(mut self, extractor: SignalExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the decision engine
    #[must_use]
    pub const fn with_engine(mut self, engine: DecisionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Signals only, without calling the classifier
    #[must_use]
    pub fn signals(&self, text: &str) -> SignalSet {
        self.extractor.extract(text)
    }

    /// Analyse raw email text
    pub async fn analyze(&self, content: &str) -> Result<AnalyzedEmail, ApplicationError> {
        self.analyze_record(0, &EmailRecord::new(content)).await
    }

    /// Analyse one batch record at position `index`
    #[instrument(skip(self, record))]
    pub async fn analyze_record(
        &self,
        index: usize,
        record: &EmailRecord,
    ) -> Result<AnalyzedEmail, ApplicationError> {
        let content = record
            .usable_content()
            .map_err(|e| ApplicationError::InputMalformed(e.to_string()))?;

        let signals = self.extractor.extract(content);
        let verdict = self.classifier.classify(content).await?;
        verdict.validate_shape()?;

        let decision = self.engine.decide(verdict, signals);
        let fingerprint = fingerprint(content);

        debug!(
            classification = %decision.classification(),
            overridden = decision.overridden(),
            fingerprint = %fingerprint.short_id(),
            "Email analysed"
        );

        Ok(AnalyzedEmail {
            index,
            decision,
            fingerprint,
            subject: record.subject.clone(),
            sender: record.sender.clone(),
        })
    }

    /// Whether the classifier service is reachable
    pub async fn is_classifier_healthy(&self) -> bool {
        self.classifier.is_healthy().await
    }
}
