//! Batch outcome records
//!
//! Produced by the batch pipeline: per-item successes and failures, progress
//! snapshots and the final result handed to the caller.

use serde::Serialize;
use std::fmt;

use super::{decision::Decision, fingerprint::Fingerprint};

/// One successfully analysed email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedEmail {
    /// Position in the input sequence (0-based)
    pub index: usize,
    pub decision: Decision,
    pub fingerprint: Fingerprint,
    pub subject: Option<String>,
    pub sender: Option<String>,
}

/// Why an item produced no decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Record was unreadable or lacked usable content
    InputMalformed,
    /// Classifier call failed or returned an error
    ClassifierUnavailable,
    /// Classifier answered with a malformed probability vector
    InvalidVerdict,
    /// Failure inside this process rather than in the input or the classifier
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InputMalformed => "input_malformed",
            Self::ClassifierUnavailable => "classifier_unavailable",
            Self::InvalidVerdict => "invalid_verdict",
            Self::Internal => "internal",
        };
        write!(f, "{s}")
    }
}

/// One item that failed in isolation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// Position in the input sequence (0-based)
    pub index: usize,
    pub subject: Option<String>,
    pub sender: Option<String>,
    pub kind: FailureKind,
    pub message: String,
}

/// Progress snapshot: `processed / total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    pub processed: usize,
    pub total: usize,
}

impl BatchProgress {
    #[must_use]
    pub const fn new(processed: usize, total: usize) -> Self {
        Self { processed, total }
    }

    /// Completed fraction in `[0.0, 1.0]`; an empty batch is complete
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.processed as f64 / self.total as f64
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Overall outcome of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// No input items
    Empty,
    /// Cancelled before any item was processed
    NotStarted,
    /// Every processed item succeeded
    Completed,
    /// Some processed items failed
    PartiallyFailed,
    /// Every processed item failed
    Failed,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::NotStarted => "not_started",
            Self::Completed => "completed",
            Self::PartiallyFailed => "partially_failed",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Final result of a batch run, owned by the caller once returned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Successful items in input order
    pub items: Vec<AnalyzedEmail>,
    /// Failed items in input order
    pub failures: Vec<ItemFailure>,
    /// Number of input items
    pub total: usize,
    /// Whether the run stopped early on request
    pub cancelled: bool,
}

impl BatchResult {
    /// Number of items that were attempted
    #[must_use]
    pub fn processed(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    #[must_use]
    pub fn progress(&self) -> BatchProgress {
        BatchProgress::new(self.processed(), self.total)
    }

    #[must_use]
    pub fn status(&self) -> BatchStatus {
        match (self.items.len(), self.failures.len()) {
            _ if self.total == 0 => BatchStatus::Empty,
            (0, 0) => BatchStatus::NotStarted,
            (0, _) => BatchStatus::Failed,
            (_, 0) => BatchStatus::Completed,
            _ => BatchStatus::PartiallyFailed,
        }
    }
}
