//! Per-protocol authentication status set

use serde::{Deserialize, Serialize};

use crate::value_objects::AuthSignal;

/// Status of a single protocol within a [`SignalSet`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolStatus {
    /// Protocol name, e.g. "SPF"
    pub protocol: String,
    /// Extracted status
    pub status: AuthSignal,
}

/// Ordered mapping protocol name -> [`AuthSignal`]
///
/// Exactly one status per protocol; order follows the rule table the set was
/// extracted with. There is no mutating API once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSet {
    entries: Vec<ProtocolStatus>,
}

impl SignalSet {
    /// Build a set from ordered `(protocol, status)` pairs
    ///
    /// A protocol that appears more than once keeps its first status.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, AuthSignal)>,
        S: Into<String>,
    {
        let mut collected: Vec<ProtocolStatus> = Vec::new();
        for (protocol, status) in entries {
            let protocol = protocol.into();
            if collected.iter().any(|e| e.protocol == protocol) {
                continue;
            }
            collected.push(ProtocolStatus { protocol, status });
        }
        Self { entries: collected }
    }

    /// Status for a protocol (case-insensitive name lookup)
    ///
    /// Returns `None` only for protocols the set does not track.
    #[must_use]
    pub fn get(&self, protocol: &str) -> Option<AuthSignal> {
        self.entries
            .iter()
            .find(|e| e.protocol.eq_ignore_ascii_case(protocol))
            .map(|e| e.status)
    }

    /// Iterate in rule order
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolStatus> {
        self.entries.iter()
    }

    /// Number of protocols reporting [`AuthSignal::Safe`]
    #[must_use]
    pub fn safe_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_safe()).count()
    }

    /// Number of tracked protocols
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
