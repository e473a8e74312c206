//! Domain entities - Decision-layer records and their projections

mod batch;
mod decision;
mod email_record;
mod fingerprint;
mod report;
mod signal_set;
mod verdict;

pub use batch::{
    AnalyzedEmail, BatchProgress, BatchResult, BatchStatus, FailureKind, ItemFailure,
};
pub use decision::Decision;
pub use email_record::{BatchInput, EmailRecord};
pub use fingerprint::Fingerprint;
pub use report::{
    BatchReport, BatchReportRow, BatchSummary, FailureRow, NOT_AVAILABLE, ProtocolRow, Report,
    to_batch_report, to_report,
};
pub use signal_set::{ProtocolStatus, SignalSet};
pub use verdict::ClassifierVerdict;
