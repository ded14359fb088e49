use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FeedbackError;

/// One trimmed, non-empty piece of submitted feedback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackItem(String);

impl FeedbackItem {
    pub fn parse(raw: &str) -> Result<Self, FeedbackError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FeedbackError::EmptyFeedback);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for FeedbackItem {
    type Error = FeedbackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FeedbackItem> for String {
    fn from(value: FeedbackItem) -> Self {
        value.0
    }
}

impl AsRef<str> for FeedbackItem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedbackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to greet the user with; falls back to the email address.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

const PARTITION_PREFIX: &str = "feedback:";
const ANONYMOUS_PARTITION: &str = "anonymous";

/// Store key holding one identity's feedback collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    pub fn for_identity(identity: Option<&UserIdentity>) -> Self {
        match identity {
            Some(identity) if !identity.email.trim().is_empty() => Self(format!(
                "{PARTITION_PREFIX}{}",
                identity.email.trim().to_lowercase()
            )),
            _ => Self::anonymous(),
        }
    }

    pub fn anonymous() -> Self {
        Self(format!("{PARTITION_PREFIX}{ANONYMOUS_PARTITION}"))
    }

    /// Wraps a key read back from a store or typed by an operator.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0
            .strip_prefix(PARTITION_PREFIX)
            .is_some_and(|rest| rest == ANONYMOUS_PARTITION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
