use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the person submitting feedback or signing in.
///
/// Persistence failures never appear here; the storage layer logs and
/// recovers them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Please enter your feedback before submitting.")]
    EmptyFeedback,
    #[error("Feedback is still loading; try again in a moment.")]
    NotReady,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl FeedbackError {
    /// Short title for a blocking notice.
    pub fn title(&self) -> &'static str {
        match self {
            Self::EmptyFeedback => "Empty Feedback",
            Self::NotReady => "Please wait",
            Self::Auth(err) => err.title(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthErrorKind {
    MissingCredentials,
    MissingName,
    MissingFields,
    InvalidEmail,
    WeakPassword,
    PasswordMismatch,
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            AuthErrorKind::MissingCredentials => "Missing credentials",
            AuthErrorKind::MissingName => "Missing name",
            AuthErrorKind::MissingFields => "Missing fields",
            AuthErrorKind::InvalidEmail => "Invalid email",
            AuthErrorKind::WeakPassword => "Weak password",
            AuthErrorKind::PasswordMismatch => "Password mismatch",
            AuthErrorKind::InvalidCredentials => "Login failed",
        }
    }
}
