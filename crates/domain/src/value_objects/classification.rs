//! Binary spam classification value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Binary classification label
///
/// Maps to the classifier service's class indices:
/// - 0: not spam
/// - 1: spam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Legitimate email
    NotSpam,
    /// Spam or phishing
    Spam,
}

impl Classification {
    /// Convert from the classifier's class index
    pub fn from_class_index(index: i64) -> Result<Self, DomainError> {
        match index {
            0 => Ok(Self::NotSpam),
            1 => Ok(Self::Spam),
            other => Err(DomainError::UnknownClass(other)),
        }
    }

    /// Class index used by the classifier service
    #[must_use]
    pub const fn class_index(self) -> usize {
        match self {
            Self::NotSpam => 0,
            Self::Spam => 1,
        }
    }

    /// Report label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotSpam => "Not Spam",
            Self::Spam => "Spam",
        }
    }

    #[must_use]
    pub const fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
