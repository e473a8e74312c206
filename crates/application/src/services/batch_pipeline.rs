//! Batch pipeline
//!
//! Runs the analysis of one email over an ordered collection. Items are handled
//! strictly one at a time in input order. A failing item is recorded and the
//! run continues. Progress is published once at 0 and once after every item.
//! Cancellation is cooperative and only observed between items, so an
//! in-flight classifier call always finishes.

use std::{
    fmt,
    iter::Enumerate,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    vec,
};

use domain::{AnalyzedEmail, BatchProgress, BatchResult, EmailRecord, ItemFailure};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, services::analysis_service::AnalysisService};

/// Cloneable handle used to stop a running batch at the next item boundary
#[derive(Debug, Clone, Default)]
pub struct BatchCancelHandle {
    flag: Arc<AtomicBool>,
}

impl BatchCancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Result of processing one item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Analyzed(AnalyzedEmail),
    Failed(ItemFailure),
}

impl ItemOutcome {
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Analyzed(email) => email.index,
            Self::Failed(failure) => failure.index,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Analyzed(_))
    }
}

/// Factory for batch jobs sharing one analysis service
#[derive(Debug, Clone)]
pub struct BatchPipeline {
    analysis: Arc<AnalysisService>,
    max_items: Option<usize>,
}

impl BatchPipeline {
    pub const fn new(analysis: Arc<AnalysisService>) -> Self {
        Self {
            analysis,
            max_items: None,
        }
    }

    /// Reject batches larger than `max_items` before any item starts
    #[must_use]
    pub const fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    /// Create a job over `records`
    ///
    /// Emits the initial progress event. The only whole-batch failure is an
    /// oversized input.
    pub fn start(&self, records: Vec<EmailRecord>) -> Result<BatchJob, ApplicationError> {
        if let Some(limit) = self.max_items {
            if records.len() > limit {
                return Err(ApplicationError::InputMalformed(format!(
                    "batch of {} emails exceeds the limit of {limit}",
                    records.len()
                )));
            }
        }

        Ok(BatchJob::new(Arc::clone(&self.analysis), records))
    }
}

/// One-shot, lazily driven batch run
///
/// Owns the remaining input and the accumulated outcomes until [`BatchJob::run`]
/// or [`BatchJob::finish`] hands the [`BatchResult`] to the caller.
pub struct BatchJob {
    analysis: Arc<AnalysisService>,
    pending: Enumerate<vec::IntoIter<EmailRecord>>,
    total: usize,
    items: Vec<AnalyzedEmail>,
    failures: Vec<ItemFailure>,
    cancel: BatchCancelHandle,
    cancelled: bool,
    progress_tx: mpsc::UnboundedSender<BatchProgress>,
    progress_rx: Option<mpsc::UnboundedReceiver<BatchProgress>>,
}

impl fmt::Debug for BatchJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchJob")
            .field("total", &self.total)
            .field("processed", &self.processed())
            .field("cancelled", &self.cancelled)
            .finish_non_exhaustive()
    }
}

impl BatchJob {
    fn new(analysis: Arc<AnalysisService>, records: Vec<EmailRecord>) -> Self {
        let total = records.len();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let job = Self {
            analysis,
            pending: records.into_iter().enumerate(),
            total,
            items: Vec::new(),
            failures: Vec::new(),
            cancel: BatchCancelHandle::default(),
            cancelled: false,
            progress_tx,
            progress_rx: Some(progress_rx),
        };
        job.publish_progress();
        job
    }

    /// Progress receiver; available once
    ///
    /// The initial event at 0 is already queued.
    pub fn take_progress_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<BatchProgress>> {
        self.progress_rx.take()
    }

    /// Handle that requests cancellation at the next item boundary
    #[must_use]
    pub fn cancel_handle(&self) -> BatchCancelHandle {
        self.cancel.clone()
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.items.len() + self.failures.len()
    }

    #[must_use]
    pub fn progress(&self) -> BatchProgress {
        BatchProgress::new(self.processed(), self.total)
    }

    fn publish_progress(&self) {
        // A dropped receiver only means nobody is watching.
        let _ = self.progress_tx.send(self.progress());
    }

    /// Process the next item
    ///
    /// Returns `None` once the input is exhausted or cancellation was requested.
    pub async fn next(&mut self) -> Option<ItemOutcome> {
        if self.cancelled {
            return None;
        }
        if self.cancel.is_cancelled() && self.processed() < self.total {
            info!(
                processed = self.processed(),
                total = self.total,
                "Batch cancelled at item boundary"
            );
            self.cancelled = true;
            return None;
        }

        let (index, record) = self.pending.next()?;
        let outcome = match self.analysis.analyze_record(index, &record).await {
            Ok(analyzed) => {
                self.items.push(analyzed.clone());
                ItemOutcome::Analyzed(analyzed)
            },
            Err(e) => {
                warn!(index, error = %e, "Batch item failed");
                let failure = ItemFailure {
                    index,
                    subject: record.subject,
                    sender: record.sender,
                    kind: e.failure_kind(),
                    message: e.to_string(),
                };
                self.failures.push(failure.clone());
                ItemOutcome::Failed(failure)
            },
        };

        self.publish_progress();
        Some(outcome)
    }

    /// Stop here and hand over what has been accumulated
    #[must_use]
    pub fn finish(self) -> BatchResult {
        let result = BatchResult {
            items: self.items,
            failures: self.failures,
            total: self.total,
            cancelled: self.cancelled,
        };
        info!(
            total = result.total,
            succeeded = result.items.len(),
            failed = result.failures.len(),
            status = %result.status(),
            "Batch finished"
        );
        result
    }

    /// Drive the job to completion or cancellation
    #[instrument(skip(self), fields(total = self.total))]
    pub async fn run(mut self) -> BatchResult {
        while self.next().await.is_some() {}
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockClassifierPort;
    use domain::{BatchStatus, Classification, ClassifierVerdict, FailureKind};

    fn records(n: usize) -> Vec<EmailRecord> {
        (1..=n)
            .map(|i| EmailRecord::new(format!("item {i}")).with_subject(format!("subject {i}")))
            .collect()
    }

    fn pipeline_failing_on(failing: &'static str) -> BatchPipeline {
        let mut mock = MockClassifierPort::new();
        mock.expect_classify().returning(move |text| {
            if text == failing {
                Err(ApplicationError::ClassifierUnavailable("timeout".into()))
            } else {
                Ok(ClassifierVerdict::new(Classification::Spam, vec![0.2, 0.8]))
            }
        });
        BatchPipeline::new(Arc::new(AnalysisService::new(Arc::new(mock))))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<BatchProgress>) -> Vec<BatchProgress> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn failed_item_is_isolated() {
        let mut job = pipeline_failing_on("item 3").start(records(5)).unwrap();
        let mut rx = job.take_progress_receiver().unwrap();

        let result = job.run().await;

        let indices: Vec<_> = result.items.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 1, 3, 4]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].index, 2);
        assert_eq!(result.failures[0].subject.as_deref(), Some("subject 3"));
        assert_eq!(result.failures[0].kind, FailureKind::ClassifierUnavailable);
        assert_eq!(result.status(), BatchStatus::PartiallyFailed);
        assert!(!result.cancelled);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], BatchProgress::new(0, 5));
        assert!(events.windows(2).all(|w| w[0].processed < w[1].processed));
        assert!((events[5].fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn all_succeed() {
        let result = pipeline_failing_on("never").start(records(3)).unwrap().run().await;
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.status(), BatchStatus::Completed);
    }

    #[tokio::test]
    async fn all_fail_is_distinguished() {
        let mut mock = MockClassifierPort::new();
        mock.expect_classify()
            .returning(|_| Err(ApplicationError::ClassifierRejected("Empty text input".into())));
        let pipeline = BatchPipeline::new(Arc::new(AnalysisService::new(Arc::new(mock))));

        let result = pipeline.start(records(2)).unwrap().run().await;
        assert!(result.items.is_empty());
        assert_eq!(result.status(), BatchStatus::Failed);
    }

    #[tokio::test]
    async fn missing_content_is_input_malformed() {
        let mut input = records(2);
        input.insert(1, EmailRecord::default());

        let result = pipeline_failing_on("never").start(input).unwrap().run().await;
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.failures[0].index, 1);
        assert_eq!(result.failures[0].kind, FailureKind::InputMalformed);
    }

    #[tokio::test]
    async fn unreadable_entries_fail_individually() {
        let input = domain::BatchInput::from_json(
            r#"{"emails": [{"body": "item 1"}, {"body": 42, "subject": "typed"}, "just a string", null, {"body": "item 2"}]}"#,
        )
        .unwrap();

        let mut job = pipeline_failing_on("never").start(input.emails).unwrap();
        let mut rx = job.take_progress_receiver().unwrap();
        let result = job.run().await;

        let indices: Vec<_> = result.items.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 4]);
        let failed: Vec<_> = result.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![1, 2, 3]);
        assert!(
            result
                .failures
                .iter()
                .all(|f| f.kind == FailureKind::InputMalformed)
        );
        assert_eq!(result.failures[0].subject.as_deref(), Some("typed"));
        assert_eq!(result.status(), BatchStatus::PartiallyFailed);
        assert_eq!(drain(&mut rx).len(), 6);
    }

    #[tokio::test]
    async fn empty_batch() {
        let mut job = pipeline_failing_on("never").start(Vec::new()).unwrap();
        let mut rx = job.take_progress_receiver().unwrap();
        let result = job.run().await;

        assert_eq!(result.status(), BatchStatus::Empty);
        let events = drain(&mut rx);
        assert_eq!(events, vec![BatchProgress::new(0, 0)]);
        assert!(events[0].is_complete());
    }

    #[tokio::test]
    async fn cancellation_keeps_partial_results() {
        let cancel_slot: Arc<std::sync::OnceLock<BatchCancelHandle>> = Arc::default();
        let slot = Arc::clone(&cancel_slot);

        let mut mock = MockClassifierPort::new();
        mock.expect_classify().times(2).returning(move |text| {
            if text == "item 2" {
                if let Some(handle) = slot.get() {
                    handle.cancel();
                }
            }
            Ok(ClassifierVerdict::new(Classification::NotSpam, vec![0.9, 0.1]))
        });
        let pipeline = BatchPipeline::new(Arc::new(AnalysisService::new(Arc::new(mock))));

        let job = pipeline.start(records(5)).unwrap();
        let _ = cancel_slot.set(job.cancel_handle());
        let result = job.run().await;

        assert!(result.cancelled);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.processed(), 2);
        assert_eq!(result.total, 5);
        assert_eq!(result.status(), BatchStatus::Completed);
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let mut mock = MockClassifierPort::new();
        mock.expect_classify().never();
        let pipeline = BatchPipeline::new(Arc::new(AnalysisService::new(Arc::new(mock))));

        let job = pipeline.start(records(3)).unwrap();
        job.cancel_handle().cancel();
        let result = job.run().await;

        assert!(result.cancelled);
        assert_eq!(result.status(), BatchStatus::NotStarted);
    }

    #[tokio::test]
    async fn lazy_iteration_yields_in_order() {
        let mut job = pipeline_failing_on("item 2").start(records(3)).unwrap();

        let first = job.next().await.unwrap();
        assert_eq!(first.index(), 0);
        assert!(first.is_success());
        assert_eq!(job.processed(), 1);

        let second = job.next().await.unwrap();
        assert_eq!(second.index(), 1);
        assert!(!second.is_success());

        assert_eq!(job.next().await.map(|o| o.index()), Some(2));
        assert!(job.next().await.is_none());
        assert!(job.next().await.is_none());
        assert!(job.progress().is_complete());
    }

    #[tokio::test]
    async fn progress_receiver_is_taken_once() {
        let mut job = pipeline_failing_on("never").start(records(1)).unwrap();
        assert!(job.take_progress_receiver().is_some());
        assert!(job.take_progress_receiver().is_none());
    }

    #[test]
    fn oversized_batch_rejected_up_front() {
        let pipeline = pipeline_failing_on("never").with_max_items(Some(2));
        assert!(matches!(
            pipeline.start(records(3)),
            Err(ApplicationError::InputMalformed(_))
        ));
        assert!(pipeline.start(records(2)).is_ok());
    }
}
