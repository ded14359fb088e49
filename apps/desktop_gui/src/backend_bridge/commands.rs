//! Backend commands queued from UI to backend worker.

use shared::domain::{FeedbackItem, PartitionKey};

#[derive(Debug)]
pub enum BackendCommand {
    Load {
        partition: PartitionKey,
    },
    Save {
        partition: PartitionKey,
        items: Vec<FeedbackItem>,
    },
    /// Flush pending saves and stop the worker.
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Save { .. } => "save",
            Self::Shutdown => "shutdown",
        }
    }
}
