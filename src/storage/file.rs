//! File-backed storage: one JSON file per durable key
//!
//! Writes go through a temp file followed by a rename, so a crash mid-write
//! leaves the previous snapshot intact rather than a truncated file.

use super::Storage;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Stores each key as `<base_dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_dir`. The directory is created
    /// lazily on first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, payload: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let path = self.path_for(key);
        let tmp = self.base_dir.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp, payload).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(key, path = %path.display(), "snapshot written");
        Ok(())
    }
}
