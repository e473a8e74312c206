//! Authentication signal status value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of one email-authentication protocol as reported in the headers
///
/// `Unknown` is the default: absence of a matching header line is never
/// read as a pass or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthSignal {
    /// The header reports a passing / enforcing result
    Safe,
    /// The header reports a failing, soft-failing, neutral or absent policy
    Unsafe,
    /// No matching header line was found
    #[default]
    Unknown,
}

impl AuthSignal {
    /// Human-readable label used in reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Unsafe => "Unsafe",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this signal counts towards the authentication override
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Safe)
    }
}

impl fmt::Display for AuthSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
