//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and carries the ambient
//! concerns: configuration loading, logging setup and retry handling.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, BatchConfig, Environment, PolicyConfig};
pub use retry::{RetryConfig, Retryable, retry, with_retry};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
