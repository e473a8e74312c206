//! Retry with exponential backoff
//!
//! Wraps classifier calls so transient failures (timeouts, refused connections,
//! 5xx answers) are retried with growing, jittered delays. Errors that cannot
//! improve on a second attempt are returned immediately.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use ai_classifier::ClassifierError;
use application::ApplicationError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Delay before the first retry in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for a single delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Retries after the first attempt; 0 disables retrying
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Maximum jitter as a fraction of the delay (0.0 disables jitter)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_initial_delay() -> u64 {
    200
}

const fn default_max_delay() -> u64 {
    5_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_retries: default_max_retries(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    /// Single attempt, no retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed)
    ///
    /// `initial_delay * multiplier^attempt`, capped at `max_delay`, then jittered.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = (self.initial_delay_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped = base.min(self.max_delay_ms as f64);

        let delay = if self.jitter_factor > 0.0 {
            let range = capped * self.jitter_factor;
            (capped + rand::rng().random_range(-range..=range)).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(delay as u64)
    }
}

/// Errors that can tell whether another attempt might succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ClassifierError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

impl Retryable for ApplicationError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Run `operation` until it succeeds, fails permanently or retries run out
///
/// Returns the final result and the number of attempts made.
#[allow(clippy::cast_possible_truncation)]
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> (Result<T, E>, u32)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let err = match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(
                        attempts,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Operation succeeded after retries"
                    );
                }
                return (Ok(value), attempts);
            },
            Err(err) => err,
        };

        if !err.is_retryable() {
            debug!(attempts, error = %err, "Operation failed with non-retryable error");
            return (Err(err), attempts);
        }

        let retry_attempt = attempts - 1;
        if retry_attempt >= config.max_retries {
            warn!(
                attempts,
                max_retries = config.max_retries,
                error = %err,
                "Operation failed after max retries"
            );
            return (Err(err), attempts);
        }

        let delay = config.delay_for_attempt(retry_attempt);
        warn!(
            attempt = attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Operation failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

/// [`with_retry`] without the attempt count
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    with_retry(config, operation).await.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    fn fast() -> RetryConfig {
        RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 5,
            multiplier: 2.0,
            max_retries: 3,
            jitter_factor: 0.0,
        }
    }

    #[test]
    fn config_default_values() {
        let config = RetryConfig::default();
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 5_000);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn delay_grows_and_caps() {
        let config = RetryConfig {
            jitter_factor: 0.0,
            ..RetryConfig::default()
        };
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(400));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(5_000));
    }

    #[test]
    fn jitter_stays_in_range() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((180..=220).contains(&ms), "{ms}");
        }
    }

    #[tokio::test]
    async fn retries_transient_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let (result, attempts) = with_retry(&fast(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ClassifierError::Timeout("slow".into()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn stops_on_permanent_error() {
        let (result, attempts) = with_retry(&fast(), || async {
            Err::<(), _>(ClassifierError::Rejected("Empty text input".into()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let (result, attempts) = with_retry(&fast(), || async {
            Err::<(), _>(ApplicationError::ClassifierUnavailable("down".into()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts, 4);
    }

    #[tokio::test]
    async fn disabled_makes_one_attempt() {
        let result = retry(&RetryConfig::disabled(), || async {
            Err::<(), _>(ClassifierError::ConnectionFailed("refused".into()))
        })
        .await;
        assert!(result.is_err());
    }
}
