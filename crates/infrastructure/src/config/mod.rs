//! Application configuration
//!
//! Layered: built-in defaults, then an optional `config.toml`, then
//! environment variables such as `EMAILSHIELD_POLICY__SAFE_THRESHOLD=4`.

mod policy;

use std::{fmt, path::Path};

use ai_classifier::ClassifierConfig;
use application::{
    ApplicationError,
    services::{DecisionEngine, SignalExtractor},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    retry::RetryConfig,
    telemetry::{LogFormat, TelemetryConfig},
};

pub use policy::{BatchConfig, PolicyConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EMAILSHIELD";

/// Application environment (development or production)
///
/// Selects the default log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - human readable logs
    #[default]
    Development,
    /// Production environment - JSON logs
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Classification service client
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Signal rules and override threshold
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    /// Retry behaviour for classifier calls
    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file, then environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("environment", "development")?
            .set_default("classifier.base_url", "http://127.0.0.1:8080")?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            environment = %config.environment,
            classifier = %config.classifier.base_url,
            rules = config.policy.rules.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reject configurations the services cannot run with
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.policy.validate()?;

        if self.classifier.base_url.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "classifier.base_url must not be empty".to_string(),
            ));
        }
        if self.classifier.timeout_ms == 0 {
            return Err(ApplicationError::Configuration(
                "classifier.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.batch.max_items == Some(0) {
            return Err(ApplicationError::Configuration(
                "batch.max_items must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Signal extractor compiled from the configured rule table
    pub fn signal_extractor(&self) -> Result<SignalExtractor, ApplicationError> {
        SignalExtractor::new(&self.policy.rules)
    }

    /// Decision engine with the configured threshold
    #[must_use]
    pub const fn decision_engine(&self) -> DecisionEngine {
        DecisionEngine::new(self.policy.override_policy())
    }

    /// Log format, falling back to the environment's default
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.telemetry.log_format.unwrap_or(match self.environment {
            Environment::Development => LogFormat::Text,
            Environment::Production => LogFormat::Json,
        })
    }
}
