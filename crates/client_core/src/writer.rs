//! Write-behind persistence.
//!
//! Saves are queued to one background task and applied in submission order,
//! so the last queued collection for a partition is the one left in the store.
//! Failed writes are logged and dropped.

use std::sync::Arc;

use shared::domain::{FeedbackItem, PartitionKey};
use storage::FeedbackStore;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, warn};

enum WriterMessage {
    Save {
        key: PartitionKey,
        items: Vec<FeedbackItem>,
    },
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriterMessage>,
}

impl PersistenceWriter {
    /// Starts the writer task. Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<dyn FeedbackStore>) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_writer(store, rx));
        (Self { tx }, task)
    }

    /// Queues a full-collection save without waiting for it.
    pub fn enqueue(&self, key: PartitionKey, items: Vec<FeedbackItem>) {
        let count = items.len();
        if self
            .tx
            .send(WriterMessage::Save {
                key: key.clone(),
                items,
            })
            .is_err()
        {
            warn!(partition = %key, count, "persistence writer stopped; dropping save");
        }
    }

    /// Resolves once every save queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriterMessage::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

async fn run_writer(
    store: Arc<dyn FeedbackStore>,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            WriterMessage::Save { key, items } => match store.save(&key, &items).await {
                Ok(()) => debug!(partition = %key, count = items.len(), "feedback persisted"),
                Err(err) => warn!(partition = %key, "failed to persist feedback: {err:#}"),
            },
            WriterMessage::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("persistence writer stopped");
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
