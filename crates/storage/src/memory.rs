use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shared::domain::{FeedbackItem, PartitionKey};

use crate::{decode_items, encode_items, FeedbackStore, StoredPartition};

/// Process-local store with the same encoding rules as [`crate::Storage`].
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<PartitionKey, (String, DateTime<Utc>)>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_raw(&self, key: &PartitionKey, raw: impl Into<String>) {
        self.values
            .write()
            .await
            .insert(key.clone(), (raw.into(), Utc::now()));
    }

    /// Makes every following `save` fail, to exercise write-behind error paths.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn load(&self, key: &PartitionKey) -> Vec<FeedbackItem> {
        match self.values.read().await.get(key) {
            Some((raw, _)) => decode_items(key, raw),
            None => Vec::new(),
        }
    }

    async fn save(&self, key: &PartitionKey, items: &[FeedbackItem]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            bail!("memory store rejected write for partition '{key}'");
        }
        let raw = encode_items(items)?;
        self.put_raw(key, raw).await;
        Ok(())
    }

    async fn clear(&self, key: &PartitionKey) -> Result<bool> {
        Ok(self.values.write().await.remove(key).is_some())
    }

    async fn list_partitions(&self) -> Result<Vec<StoredPartition>> {
        Ok(self
            .values
            .read()
            .await
            .iter()
            .map(|(key, (raw, updated_at))| StoredPartition {
                key: key.clone(),
                item_count: decode_items(key, raw).len(),
                updated_at: *updated_at,
            })
            .collect())
    }

    async fn load_raw(&self, key: &PartitionKey) -> Result<Option<String>> {
        Ok(self
            .values
            .read()
            .await
            .get(key)
            .map(|(raw, _)| raw.clone()))
    }
}
