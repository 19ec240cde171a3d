//! In-memory storage backend for tests

use super::Storage;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// HashMap-backed storage. Used as the test substitute for [`FileStorage`]
/// (see `FileStorage` in this module's parent).
#[derive(Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with the given key/payload pairs.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, payload: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing() {
        let storage = InMemoryStorage::new();
        assert!(storage.load("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let storage = InMemoryStorage::new();
        storage.save("k", "v").await.unwrap();
        assert_eq!(storage.load("k").await.unwrap().unwrap(), "v");
    }

    #[tokio::test]
    async fn test_with_entries() {
        let storage =
            InMemoryStorage::with_entries([("k".to_string(), "seeded".to_string())]);
        assert_eq!(storage.load("k").await.unwrap().unwrap(), "seeded");
    }
}
