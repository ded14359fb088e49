//! Client-side feedback collection: the in-memory board, the async session
//! that loads and persists it per identity, and the demo sign-in stub.

pub mod auth;
pub mod board;
pub mod config;
pub mod session;
pub mod writer;

pub use auth::{sign_in, sign_up, SignUpRequest};
pub use board::FeedbackBoard;
pub use config::{load_settings, prepare_database_url, Settings};
pub use session::{FeedbackSession, LoadState};
pub use writer::PersistenceWriter;
