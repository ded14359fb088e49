use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, error, warn};

use shared::domain::{FeedbackItem, PartitionKey};

mod memory;
pub use memory::MemoryStore;

/// Key-value persistence for feedback collections, one value per partition.
///
/// `load` never fails: missing, malformed or unreadable values come back as an
/// empty collection. `save` reports errors so callers can log them, but the
/// in-memory collection stays the source of truth.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn load(&self, key: &PartitionKey) -> Vec<FeedbackItem>;
    async fn save(&self, key: &PartitionKey, items: &[FeedbackItem]) -> Result<()>;
    async fn clear(&self, key: &PartitionKey) -> Result<bool>;
    async fn list_partitions(&self) -> Result<Vec<StoredPartition>>;
    /// The stored value exactly as written, for inspection tooling.
    async fn load_raw(&self, key: &PartitionKey) -> Result<Option<String>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPartition {
    pub key: PartitionKey,
    pub item_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// Serializes a collection as the JSON array of strings kept in the store.
pub fn encode_items(items: &[FeedbackItem]) -> Result<String> {
    serde_json::to_string(items).context("failed to encode feedback items")
}

/// Parses a stored value, degrading to an empty collection when the value is
/// not a JSON array. Array elements that are not non-blank strings are skipped.
pub fn decode_items(key: &PartitionKey, raw: &str) -> Vec<FeedbackItem> {
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(other) => {
            warn!(
                partition = %key,
                kind = value_kind(&other),
                "stored feedback is not an array; treating as empty"
            );
            return Vec::new();
        }
        Err(err) => {
            warn!(partition = %key, "stored feedback is not valid json; treating as empty: {err}");
            return Vec::new();
        }
    };

    let total = values.len();
    let items: Vec<FeedbackItem> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) => FeedbackItem::parse(&text).ok(),
            _ => None,
        })
        .collect();
    if items.len() != total {
        warn!(
            partition = %key,
            skipped = total - items.len(),
            "skipped stored feedback entries that are not non-empty strings"
        );
    }
    items
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// SQLite-backed store: one row per partition holding the serialized collection.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url '{database_url}'"))?
            .create_if_missing(true);
        // Every connection to `sqlite::memory:` opens a fresh database, so an
        // in-memory store must stay on one long-lived connection.
        let pool_options = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open sqlite database '{database_url}'"))?;

        let storage = Self { pool };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback_partitions (
                partition_key TEXT PRIMARY KEY NOT NULL,
                items_json    TEXT NOT NULL,
                updated_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure feedback_partitions table exists")?;
        Ok(())
    }

    /// Writes a raw value without validation. Used to seed inspection tooling
    /// and tests with data written by older or foreign clients.
    pub async fn put_raw(&self, key: &PartitionKey, raw: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO feedback_partitions (partition_key, items_json, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(partition_key) DO UPDATE SET items_json = excluded.items_json, updated_at = excluded.updated_at",
        )
        .bind(key.as_str())
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write feedback partition '{key}'"))?;
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for Storage {
    async fn load(&self, key: &PartitionKey) -> Vec<FeedbackItem> {
        match self.load_raw(key).await {
            Ok(Some(raw)) => {
                let items = decode_items(key, &raw);
                debug!(partition = %key, count = items.len(), "loaded feedback partition");
                items
            }
            Ok(None) => {
                debug!(partition = %key, "no stored feedback for partition");
                Vec::new()
            }
            Err(err) => {
                error!(partition = %key, "failed to load feedback; starting empty: {err:#}");
                Vec::new()
            }
        }
    }

    async fn save(&self, key: &PartitionKey, items: &[FeedbackItem]) -> Result<()> {
        let raw = encode_items(items)?;
        self.put_raw(key, &raw).await?;
        debug!(partition = %key, count = items.len(), "saved feedback partition");
        Ok(())
    }

    async fn clear(&self, key: &PartitionKey) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM feedback_partitions WHERE partition_key = ?")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to clear feedback partition '{key}'"))?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn list_partitions(&self) -> Result<Vec<StoredPartition>> {
        let rows = sqlx::query(
            "SELECT partition_key, items_json, updated_at FROM feedback_partitions ORDER BY partition_key",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list feedback partitions")?;

        rows.into_iter()
            .map(|row| -> Result<StoredPartition> {
                let key = PartitionKey::from_raw(row.try_get::<String, _>(0)?);
                let raw: String = row.try_get(1)?;
                Ok(StoredPartition {
                    item_count: decode_items(&key, &raw).len(),
                    updated_at: row.try_get::<DateTime<Utc>, _>(2)?,
                    key,
                })
            })
            .collect()
    }

    async fn load_raw(&self, key: &PartitionKey) -> Result<Option<String>> {
        let row = sqlx::query("SELECT items_json FROM feedback_partitions WHERE partition_key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read feedback partition '{key}'"))?;
        Ok(row.map(|r| r.get::<String, _>(0)))
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
