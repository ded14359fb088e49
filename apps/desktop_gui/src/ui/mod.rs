//! UI layer for the desktop GUI: app shell plus the login and feedback screens.

pub mod app;
mod feedback;
mod login;

pub use app::FeedbackApp;
