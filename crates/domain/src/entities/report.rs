//! Export-ready report projections
//!
//! Pure projections of decisions for the document/structured-file writers.
//! Optional fields are never omitted: absent values render as [`NOT_AVAILABLE`]
//! so downstream consumers see a stable schema. Projections carry no timestamp;
//! writers stamp one with `with_generated_at` when exporting.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    batch::{AnalyzedEmail, BatchResult, BatchStatus, ItemFailure},
    decision::Decision,
    fingerprint::Fingerprint,
};
use crate::value_objects::{StrongDigest, WeakDigest};

/// Marker for absent optional values
pub const NOT_AVAILABLE: &str = "N/A";

/// Marker for an empty list of link anomalies
const NO_ANOMALIES: &str = "None";

/// One row of the protocol status table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolRow {
    pub protocol: String,
    pub status: String,
}

/// Single-email report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Identity derived from the strong digest
    pub id: String,
    pub generated_at: Option<DateTime<Utc>>,
    pub subject: String,
    pub sender: String,
    pub final_classification: String,
    pub predicted_classification: String,
    pub overridden: bool,
    pub spam_probability: String,
    pub not_spam_probability: String,
    /// Classifier probability of its own predicted class
    pub confidence: String,
    pub blacklist_weight: String,
    pub link_anomalies: String,
    pub protocols: Vec<ProtocolRow>,
    pub weak_digest_algorithm: &'static str,
    pub md5: String,
    pub strong_digest_algorithm: &'static str,
    pub sha256: String,
    /// Analysed email text, attached by the writer
    pub content: String,
}

impl Report {
    /// Project one analysed email
    #[must_use]
    pub fn project(email: &AnalyzedEmail) -> Self {
        to_report(
            &email.decision,
            &email.fingerprint,
            email.subject.as_deref(),
            email.sender.as_deref(),
        )
    }

    /// Stamp the generation timestamp
    #[must_use]
    pub const fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Attach the analysed text
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Project a decision and its fingerprint into a single-email report
#[must_use]
pub fn to_report(
    decision: &Decision,
    fingerprint: &Fingerprint,
    subject: Option<&str>,
    sender: Option<&str>,
) -> Report {
    let verdict = decision.verdict();

    Report {
        id: fingerprint.short_id(),
        generated_at: None,
        subject: or_marker(subject),
        sender: or_marker(sender),
        final_classification: decision.classification().label().to_string(),
        predicted_classification: decision.predicted().label().to_string(),
        overridden: decision.overridden(),
        spam_probability: percent(verdict.spam_probability()),
        not_spam_probability: percent(verdict.not_spam_probability()),
        confidence: percent(verdict.probability_of(decision.predicted())),
        blacklist_weight: verdict
            .blacklist_weight
            .map_or_else(|| NOT_AVAILABLE.to_string(), |w| format!("{w:.2}")),
        link_anomalies: join_anomalies(&verdict.link_anomalies),
        protocols: decision
            .signals()
            .iter()
            .map(|entry| ProtocolRow {
                protocol: entry.protocol.clone(),
                status: entry.status.label().to_string(),
            })
            .collect(),
        weak_digest_algorithm: WeakDigest::ALGORITHM,
        md5: fingerprint.weak.to_hex(),
        strong_digest_algorithm: StrongDigest::ALGORITHM,
        sha256: fingerprint.strong.to_hex(),
        content: NOT_AVAILABLE.to_string(),
    }
}

/// One row of a batch report, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReportRow {
    /// Position in the input sequence (0-based)
    pub index: usize,
    pub subject: String,
    pub sender: String,
    pub classification: String,
    pub overridden: bool,
    pub spam_probability: String,
    pub link_anomalies: String,
    pub sha256: String,
}

impl BatchReportRow {
    fn project(email: &AnalyzedEmail) -> Self {
        let verdict = email.decision.verdict();
        Self {
            index: email.index,
            subject: or_marker(email.subject.as_deref()),
            sender: or_marker(email.sender.as_deref()),
            classification: email.decision.classification().label().to_string(),
            overridden: email.decision.overridden(),
            spam_probability: percent(verdict.spam_probability()),
            link_anomalies: join_anomalies(&verdict.link_anomalies),
            sha256: email.fingerprint.strong.to_hex(),
        }
    }
}

/// One failed item in a batch report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRow {
    pub index: usize,
    pub subject: String,
    pub sender: String,
    pub reason: String,
}

impl FailureRow {
    fn project(failure: &ItemFailure) -> Self {
        Self {
            index: failure.index,
            subject: or_marker(failure.subject.as_deref()),
            sender: or_marker(failure.sender.as_deref()),
            reason: format!("{}: {}", failure.kind, failure.message),
        }
    }
}

/// Aggregate counts for a batch report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub spam: usize,
    pub overridden: usize,
    pub cancelled: bool,
    pub status: BatchStatus,
}

/// Batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub generated_at: Option<DateTime<Utc>>,
    pub summary: BatchSummary,
    pub rows: Vec<BatchReportRow>,
    pub failures: Vec<FailureRow>,
}

impl BatchReport {
    /// Project a finished batch, failures included
    #[must_use]
    pub fn project(result: &BatchResult) -> Self {
        let rows: Vec<BatchReportRow> = result.items.iter().map(BatchReportRow::project).collect();

        Self {
            generated_at: None,
            summary: BatchSummary {
                total: result.total,
                succeeded: result.items.len(),
                failed: result.failures.len(),
                spam: count_spam(&result.items),
                overridden: count_overridden(&result.items),
                cancelled: result.cancelled,
                status: result.status(),
            },
            rows,
            failures: result.failures.iter().map(FailureRow::project).collect(),
        }
    }

    /// Stamp the generation timestamp
    #[must_use]
    pub const fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Project an ordered sequence of analysed emails into a batch report
#[must_use]
pub fn to_batch_report(items: &[AnalyzedEmail]) -> BatchReport {
    let result = BatchResult {
        items: items.to_vec(),
        failures: Vec::new(),
        total: items.len(),
        cancelled: false,
    };
    BatchReport::project(&result)
}

fn or_marker(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

fn join_anomalies(anomalies: &[String]) -> String {
    if anomalies.is_empty() {
        NO_ANOMALIES.to_string()
    } else {
        anomalies.join(", ")
    }
}

fn count_spam(items: &[AnalyzedEmail]) -> usize {
    items
        .iter()
        .filter(|e| e.decision.classification().is_spam())
        .count()
}

fn count_overridden(items: &[AnalyzedEmail]) -> usize {
    items.iter().filter(|e| e.decision.overridden()).count()
}
