//! Batch input records
//!
//! Accepts the upload format `{"emails": [{"subject": "", "body": "", "sender": ""}]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DomainError;

/// One email submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Raw email text (headers and body); read from `body` or `content`
    #[serde(default, alias = "body")]
    pub content: Option<String>,
    /// Subject line, if supplied
    #[serde(default)]
    pub subject: Option<String>,
    /// Sender address, if supplied
    #[serde(default)]
    pub sender: Option<String>,
    /// Why the submitted entry could not be read as a record
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl EmailRecord {
    /// Record with content only
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Placeholder for an entry that is not a valid record
    ///
    /// String `subject` / `sender` fields are kept when the entry is an object so
    /// the failure can still be attributed in reports.
    pub fn malformed(entry: &Value, reason: impl Into<String>) -> Self {
        let text_field = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            content: None,
            subject: text_field("subject"),
            sender: text_field("sender"),
            malformed: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// The exact content to evaluate
    ///
    /// Missing or whitespace-only content is rejected; otherwise the string is
    /// returned untouched (no trimming or normalisation).
    pub fn usable_content(&self) -> Result<&str, DomainError> {
        if let Some(reason) = &self.malformed {
            return Err(DomainError::ValidationError(reason.clone()));
        }
        match self.content.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(DomainError::MissingContent),
        }
    }
}

/// Top-level batch upload document
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchInput {
    pub emails: Vec<EmailRecord>,
}

#[derive(Deserialize)]
struct RawBatchInput {
    #[serde(default)]
    emails: Vec<Value>,
}

impl BatchInput {
    /// Parse the JSON upload format
    ///
    /// Only an unreadable document fails as a whole. Entries that are not valid
    /// records are kept in place and fail individually when analysed.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let raw: RawBatchInput =
            serde_json::from_str(json).map_err(|e| DomainError::ValidationError(e.to_string()))?;
        let emails = raw
            .emails
            .into_iter()
            .map(|entry| {
                EmailRecord::deserialize(&entry)
                    .unwrap_or_else(|e| EmailRecord::malformed(&entry, e.to_string()))
            })
            .collect();
        Ok(Self { emails })
    }
}
