//! Domain types, error taxonomy and the pure list pipeline shared by the
//! feedback collector crates.

pub mod domain;
pub mod error;
pub mod view;

pub use domain::{FeedbackItem, PartitionKey, UserIdentity};
pub use error::{AuthError, AuthErrorKind, FeedbackError};
pub use view::{derive_page, PageEntry, PageView, SortOrder, ViewState, PAGE_SIZE};
