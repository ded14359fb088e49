//! Backend events and user-facing notices for the desktop GUI controller.

use shared::{
    domain::{FeedbackItem, PartitionKey},
    error::FeedbackError,
};

pub enum UiEvent {
    Loaded {
        partition: PartitionKey,
        items: Vec<FeedbackItem>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
}

/// A blocking notice shown until the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    title: String,
    message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &FeedbackError) -> Self {
        Self::warning(err.title(), err.to_string())
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
