//! Application services

pub mod analysis_service;
pub mod batch_pipeline;
pub mod decision_engine;
pub mod fingerprinter;
pub mod signal_extractor;

pub use analysis_service::AnalysisService;
pub use batch_pipeline::{BatchCancelHandle, BatchJob, BatchPipeline, ItemOutcome};
pub use decision_engine::{DecisionEngine, HIGH_CONFIDENCE_SPAM, OverridePolicy};
pub use fingerprinter::{fingerprint, verify_integrity};
pub use signal_extractor::{SignalExtractor, SignalRule, extract_signals};
