use std::sync::Arc;

use shared::{
    domain::{FeedbackItem, PartitionKey, UserIdentity},
    error::FeedbackError,
    view::{PageView, SortOrder},
};
use storage::FeedbackStore;
use tracing::{debug, info};

use crate::{
    auth::{self, SignUpRequest},
    board::FeedbackBoard,
    writer::PersistenceWriter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    SignedOut,
    Loading,
    Ready,
}

/// Feedback collection for one identity at a time, loaded from and written
/// back to a [`FeedbackStore`].
///
/// Loads are awaited on every identity change; saves go through the
/// [`PersistenceWriter`] and are never awaited by [`FeedbackSession::submit`].
pub struct FeedbackSession {
    store: Arc<dyn FeedbackStore>,
    writer: PersistenceWriter,
    identity: Option<UserIdentity>,
    partition: PartitionKey,
    board: FeedbackBoard,
    state: LoadState,
}

impl FeedbackSession {
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<dyn FeedbackStore>, page_size: usize) -> Self {
        let (writer, _writer_task) = PersistenceWriter::spawn(store.clone());
        Self {
            store,
            writer,
            identity: None,
            partition: PartitionKey::anonymous(),
            board: FeedbackBoard::new(page_size),
            state: LoadState::SignedOut,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn partition(&self) -> &PartitionKey {
        &self.partition
    }

    pub fn board(&self) -> &FeedbackBoard {
        &self.board
    }

    /// Switches to `identity` (or the anonymous partition) and waits for its
    /// collection to load.
    pub async fn open(&mut self, identity: Option<UserIdentity>) {
        self.board.clear();
        self.partition = PartitionKey::for_identity(identity.as_ref());
        self.identity = identity;
        self.state = LoadState::Loading;

        let items = self.store.load(&self.partition).await;
        info!(
            partition = %self.partition,
            count = items.len(),
            "feedback ready"
        );
        self.board.replace_items(items);
        self.state = LoadState::Ready;
    }

    pub async fn sign_in(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<UserIdentity, FeedbackError> {
        let identity = auth::sign_in(email, password)?;
        self.open(Some(identity.clone())).await;
        Ok(identity)
    }

    pub async fn sign_up(&mut self, request: &SignUpRequest) -> Result<UserIdentity, FeedbackError> {
        let identity = auth::sign_up(request)?;
        self.open(Some(identity.clone())).await;
        Ok(identity)
    }

    /// Drops the in-memory collection. Whatever was persisted stays in the store.
    pub fn sign_out(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!(email = %identity.email, "signed out");
        }
        self.board.clear();
        self.partition = PartitionKey::anonymous();
        self.state = LoadState::SignedOut;
    }

    /// Appends feedback and queues a save of the whole collection.
    pub fn submit(&mut self, raw: &str) -> Result<FeedbackItem, FeedbackError> {
        if self.state != LoadState::Ready {
            return Err(FeedbackError::NotReady);
        }
        let item = self.board.submit(raw)?.clone();
        debug!(partition = %self.partition, count = self.board.len(), "feedback submitted");
        self.writer
            .enqueue(self.partition.clone(), self.board.items().to_vec());
        Ok(item)
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) -> bool {
        self.board.set_filter(filter)
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> bool {
        self.board.set_sort(sort)
    }

    pub fn set_page(&mut self, page: usize) {
        self.board.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.board.next_page();
    }

    pub fn previous_page(&mut self) {
        self.board.previous_page();
    }

    pub fn render(&self) -> PageView {
        self.board.render()
    }

    /// Waits until every queued save has been attempted.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
