use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::ServiceError;
use models::TodoItem;

/// Full persisted state: the item map plus the monotone ID counter.
/// serde_json encodes the integer map keys as strings, so the file reads
/// `{"next_id": 3, "items": {"1": {...}, "2": {...}}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub next_id: u64,
    pub items: BTreeMap<u64, TodoItem>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self { next_id: 1, items: BTreeMap::new() }
    }
}

/// JSON file-backed holder of the todo state.
///
/// Wraps the snapshot in an async `RwLock` so concurrent front ends get a
/// single mutual-exclusion boundary, and rewrites the whole file after each
/// successful mutation. With no path it runs purely in memory.
pub struct SnapshotStore {
    inner: RwLock<Snapshot>,
    file_path: Option<PathBuf>,
}

impl SnapshotStore {
    /// Open the store backed by `path`. A missing file starts an empty
    /// store and gets written immediately; an unreadable or malformed file
    /// is logged and discarded, also starting empty.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let snapshot = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(snap) => snap,
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "snapshot unreadable, starting empty");
                    Snapshot::default()
                }
            },
            Err(_) => {
                let empty = Snapshot::default();
                let data = serde_json::to_vec(&empty)
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: RwLock::new(snapshot), file_path: Some(file_path) }))
    }

    /// Store without a backing file; state lives for the process only.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Snapshot::default()), file_path: None })
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let data = serde_json::to_vec(snapshot).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(path, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Run a read-only closure under the read lock.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Snapshot) -> T,
    {
        let snap = self.inner.read().await;
        f(&snap)
    }

    /// Apply a mutation under the write lock and persist the result. The
    /// lock is held across the file write so a concurrent mutation cannot
    /// interleave between the state change and its snapshot. If the closure
    /// fails, nothing is written.
    pub async fn mutate<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, ServiceError>,
    {
        let mut snap = self.inner.write().await;
        let out = f(&mut snap)?;
        self.save(&snap).await?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snapshot_store_{}_{}.json", tag, uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn open_missing_file_starts_empty_and_creates_it() -> anyhow::Result<()> {
        let tmp = tmp_path("missing");
        let store = SnapshotStore::open(&tmp).await?;
        assert_eq!(store.read(|s| s.next_id).await, 1);
        assert!(tokio::fs::metadata(&tmp).await.is_ok());
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn mutate_persists_and_reloads() -> anyhow::Result<()> {
        let tmp = tmp_path("reload");
        let store = SnapshotStore::open(&tmp).await?;
        store
            .mutate(|s| {
                let item = TodoItem::new(s.next_id, "persist me", "body")?;
                s.items.insert(item.id, item);
                s.next_id += 1;
                Ok(())
            })
            .await?;

        let reloaded = SnapshotStore::open(&tmp).await?;
        let (next_id, len) = reloaded.read(|s| (s.next_id, s.items.len())).await;
        assert_eq!(next_id, 2);
        assert_eq!(len, 1);
        assert_eq!(reloaded.read(|s| s.items[&1].title.clone()).await, "persist me");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_writes_nothing() -> anyhow::Result<()> {
        let tmp = tmp_path("failed");
        let store = SnapshotStore::open(&tmp).await?;
        let res = store
            .mutate(|_| -> Result<(), ServiceError> {
                Err(ServiceError::Validation("boom".into()))
            })
            .await;
        assert!(res.is_err());

        let reloaded = SnapshotStore::open(&tmp).await?;
        assert_eq!(reloaded.read(|s| s.items.len()).await, 0);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_recovers_empty() -> anyhow::Result<()> {
        let tmp = tmp_path("corrupt");
        tokio::fs::write(&tmp, b"{not json at all").await?;
        let store = SnapshotStore::open(&tmp).await?;
        assert_eq!(store.read(|s| s.next_id).await, 1);
        assert_eq!(store.read(|s| s.items.len()).await, 0);
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_wire_format_uses_string_keys() -> anyhow::Result<()> {
        let mut snap = Snapshot::default();
        let item = TodoItem::new(1, "t", "")?;
        snap.items.insert(1, item);
        snap.next_id = 2;
        let value: serde_json::Value = serde_json::to_value(&snap)?;
        assert_eq!(value["next_id"], 2);
        assert_eq!(value["items"]["1"]["title"], "t");
        assert_eq!(value["items"]["1"]["completed"], false);
        Ok(())
    }
}
