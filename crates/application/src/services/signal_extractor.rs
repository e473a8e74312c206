//! Signal extractor - authentication status from free-text headers
//!
//! Evaluates an ordered rule table of `(protocol, safe pattern, unsafe pattern)`
//! with a single loop. The safe pattern is checked first; a protocol matching
//! neither pattern is [`AuthSignal::Unknown`]. All matching is case-insensitive.

use std::sync::LazyLock;

use domain::{AuthSignal, SignalSet};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One row of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRule {
    /// Protocol name, e.g. "SPF"
    pub protocol: String,
    /// Pattern that marks the protocol as passed
    pub safe_pattern: String,
    /// Pattern that marks the protocol as failed
    pub unsafe_pattern: String,
}

impl SignalRule {
    pub fn new(
        protocol: impl Into<String>,
        safe_pattern: impl Into<String>,
        unsafe_pattern: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            safe_pattern: safe_pattern.into(),
            unsafe_pattern: unsafe_pattern.into(),
        }
    }

    /// Built-in rules for SPF, DKIM, DMARC and TLS
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("SPF", r"SPF:\s*pass", r"SPF:\s*(fail|softfail|neutral)"),
            Self::new("DKIM", r"DKIM:\s*pass", r"DKIM:\s*(fail|none)"),
            Self::new(
                "DMARC",
                r"DMARC:\s*(reject|quarantine)",
                r"DMARC:\s*(none|fail)",
            ),
            Self::new("TLS", r"TLS:\s*(required|enforced)", r"TLS:\s*(none|optional)"),
        ]
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    protocol: String,
    safe: Regex,
    unsafe_: Regex,
}

fn compile(pattern: &str, protocol: &str) -> Result<Regex, ApplicationError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            ApplicationError::Configuration(format!("invalid pattern for {protocol}: {e}"))
        })
}

/// Compiled rule table
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    rules: Vec<CompiledRule>,
}

impl SignalExtractor {
    /// Compile a rule table
    ///
    /// Fails when the table is empty, a protocol name repeats (case-insensitive)
    /// or a pattern does not compile.
    pub fn new(rules: &[SignalRule]) -> Result<Self, ApplicationError> {
        if rules.is_empty() {
            return Err(ApplicationError::Configuration(
                "signal rule table is empty".to_string(),
            ));
        }

        let mut compiled: Vec<CompiledRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if compiled
                .iter()
                .any(|c| c.protocol.eq_ignore_ascii_case(&rule.protocol))
            {
                return Err(ApplicationError::Configuration(format!(
                    "duplicate protocol in rule table: {}",
                    rule.protocol
                )));
            }
            compiled.push(CompiledRule {
                protocol: rule.protocol.clone(),
                safe: compile(&rule.safe_pattern, &rule.protocol)?,
                unsafe_: compile(&rule.unsafe_pattern, &rule.protocol)?,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Number of tracked protocols
    #[must_use]
    pub fn protocol_count(&self) -> usize {
        self.rules.len()
    }

    /// Protocol names in rule order
    pub fn protocols(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.protocol.as_str())
    }

    /// Extract one status per protocol; never fails
    #[must_use]
    pub fn extract(&self, text: &str) -> SignalSet {
        SignalSet::from_entries(self.rules.iter().map(|rule| {
            let status = if rule.safe.is_match(text) {
                AuthSignal::Safe
            } else if rule.unsafe_.is_match(text) {
                AuthSignal::Unsafe
            } else {
                AuthSignal::Unknown
            };
            (rule.protocol.clone(), status)
        }))
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

#[allow(clippy::expect_used)]
static DEFAULT_EXTRACTOR: LazyLock<SignalExtractor> = LazyLock::new(|| {
    SignalExtractor::new(&SignalRule::defaults()).expect("built-in signal rules compile")
});

/// Extract signals with the built-in rule table
#[must_use]
pub fn extract_signals(text: &str) -> SignalSet {
    DEFAULT_EXTRACTOR.extract(text)
}
