//! Configuration for the classifier client

use serde::{Deserialize, Serialize};

/// Configuration for the classification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the classification server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the prediction endpoint
    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Timeout of the health probe in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

const fn default_health_timeout_ms() -> u64 {
    5000
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            predict_path: default_predict_path(),
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl ClassifierConfig {
    /// Config pointing at a different server, other values default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Full prediction URL
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }
}
