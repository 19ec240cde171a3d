//! Memory store with snapshot persistence and search
//!
//! Same ownership and persistence model as the task store, under its own
//! durable key. The two stores never coordinate writes; a crash between a
//! task write and a memory write can leave them inconsistent, which is
//! within this system's guarantees.

use super::item::{MemoryItem, MemoryType};
use crate::error::Result;
use crate::storage::{Storage, MEMORY_KEY};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Type filter for [`MemoryStore::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Match any type.
    #[default]
    All,
    /// Match only items of the given type.
    Only(MemoryType),
}

impl TypeFilter {
    fn matches(&self, kind: MemoryType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == kind,
        }
    }
}

/// CRUD + search surface over the memory collection.
pub struct MemoryStore {
    items: RwLock<Vec<MemoryItem>>,
    storage: Arc<dyn Storage>,
}

impl MemoryStore {
    /// Open the store, loading the persisted collection.
    ///
    /// An absent or malformed snapshot yields an empty collection.
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self> {
        let items = match storage.load(MEMORY_KEY).await? {
            Some(payload) => match serde_json::from_str::<Vec<MemoryItem>>(&payload) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(key = MEMORY_KEY, error = %e, "malformed snapshot, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!(count = items.len(), "memory store loaded");

        Ok(Self {
            items: RwLock::new(items),
            storage,
        })
    }

    /// Add a note (`type=note`, medium importance).
    ///
    /// Empty or whitespace-only content is silently rejected.
    pub async fn add_note(&self, content: &str) -> Result<Option<MemoryItem>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        self.insert(MemoryItem::note(content)).await.map(Some)
    }

    /// Record a user chat message as a conversation turn.
    ///
    /// Called on every chat message regardless of task classification.
    pub async fn record_conversation_turn(&self, content: &str) -> Result<Option<MemoryItem>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        self.insert(MemoryItem::conversation(content)).await.map(Some)
    }

    /// Remove the item with the given ID. Returns `false` when absent.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|m| m.id != id);
        if items.len() == before {
            return Ok(false);
        }

        self.persist(&items).await?;
        tracing::debug!(%id, "memory deleted");
        Ok(true)
    }

    /// Items whose content contains `query` case-insensitively (empty query
    /// matches all) and whose type passes `filter`. Pure read; preserves
    /// insertion order.
    pub async fn search(&self, query: &str, filter: TypeFilter) -> Vec<MemoryItem> {
        let needle = query.to_lowercase();
        self.items
            .read()
            .await
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&needle) && filter.matches(m.kind))
            .cloned()
            .collect()
    }

    /// All items, newest first.
    pub async fn all(&self) -> Vec<MemoryItem> {
        self.items.read().await.clone()
    }

    /// Number of items in the collection.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn insert(&self, item: MemoryItem) -> Result<MemoryItem> {
        let mut items = self.items.write().await;
        items.insert(0, item.clone());
        self.persist(&items).await?;

        tracing::debug!(id = %item.id, kind = %item.kind, "memory added");
        Ok(item)
    }

    /// Rewrite the full durable snapshot.
    async fn persist(&self, items: &[MemoryItem]) -> Result<()> {
        let payload = serde_json::to_string(items)?;
        self.storage.save(MEMORY_KEY, &payload).await
    }
}
