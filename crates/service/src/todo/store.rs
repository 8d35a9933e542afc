use std::sync::Arc;

use crate::errors::ServiceError;
use crate::storage::snapshot_store::SnapshotStore;
use models::{validate_title, TodoItem, TodoPatch};

/// The todo collection: an ID-ordered item map plus the `next_id` counter,
/// persisted to a JSON snapshot after every mutation.
///
/// IDs are assigned monotonically and never reused, so ascending-ID
/// iteration equals insertion order even after deletions.
#[derive(Clone)]
pub struct TodoStore {
    store: Arc<SnapshotStore>,
}

impl TodoStore {
    /// Open a store backed by the snapshot file at `path`. A missing or
    /// malformed snapshot starts the store empty.
    pub async fn open<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = SnapshotStore::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// In-memory store, no persistence. State lives for the process only.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { store: SnapshotStore::in_memory() })
    }

    /// Create a new item with the next ID and `completed = false`. Fails
    /// with `Validation` if the title is empty after trimming.
    pub async fn add(&self, title: &str, description: &str) -> Result<TodoItem, ServiceError> {
        let title = validate_title(title)?;
        let description = description.to_string();
        self.store
            .mutate(|snap| {
                let item = TodoItem {
                    id: snap.next_id,
                    title,
                    description,
                    completed: false,
                };
                snap.items.insert(item.id, item.clone());
                snap.next_id += 1;
                Ok(item)
            })
            .await
    }

    /// Fetch one item by ID.
    pub async fn get(&self, id: u64) -> Result<TodoItem, ServiceError> {
        self.store
            .read(|snap| snap.items.get(&id).cloned())
            .await
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// All items in ascending ID order. Never fails.
    pub async fn list(&self) -> Vec<TodoItem> {
        self.store.read(|snap| snap.items.values().cloned().collect()).await
    }

    /// Overwrite the provided fields, leaving unset ones unchanged. A new
    /// title goes through the same validation as creation.
    pub async fn update(&self, id: u64, patch: TodoPatch) -> Result<TodoItem, ServiceError> {
        let title = match &patch.title {
            Some(t) => Some(validate_title(t)?),
            None => None,
        };
        self.store
            .mutate(|snap| {
                let item = snap.items.get_mut(&id).ok_or_else(|| ServiceError::not_found(id))?;
                if let Some(t) = title {
                    item.title = t;
                }
                if let Some(d) = patch.description {
                    item.description = d;
                }
                Ok(item.clone())
            })
            .await
    }

    /// Remove an item. The freed ID is never reassigned.
    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        self.store
            .mutate(|snap| {
                snap.items.remove(&id).ok_or_else(|| ServiceError::not_found(id))?;
                Ok(())
            })
            .await
    }

    /// Set the completion flag to true. Idempotent.
    pub async fn mark_complete(&self, id: u64) -> Result<TodoItem, ServiceError> {
        self.set_completed(id, true).await
    }

    /// Set the completion flag to false. Idempotent.
    pub async fn mark_incomplete(&self, id: u64) -> Result<TodoItem, ServiceError> {
        self.set_completed(id, false).await
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<TodoItem, ServiceError> {
        self.store
            .mutate(|snap| {
                let item = snap.items.get_mut(&id).ok_or_else(|| ServiceError::not_found(id))?;
                item.completed = completed;
                Ok(item.clone())
            })
            .await
    }
}
