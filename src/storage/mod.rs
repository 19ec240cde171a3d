//! Durable key-value storage port
//!
//! Both collections persist as full JSON snapshots under named keys. The
//! store and stats layers only see the [`Storage`] trait, so tests can
//! substitute [`InMemoryStorage`] for the real file backend.

mod file;
mod mem;

pub use file::FileStorage;
pub use mem::InMemoryStorage;

use crate::error::Result;
use async_trait::async_trait;

/// Durable key for the task collection.
pub const TASKS_KEY: &str = "assistantTasks";

/// Durable key for the memory collection.
pub const MEMORY_KEY: &str = "assistantMemory";

/// Key-value persistence port.
///
/// `load` returns `Ok(None)` when a key has never been written. Malformed
/// payloads are not the storage layer's concern — callers treat them as
/// absent.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the payload stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`.
    async fn save(&self, key: &str, payload: &str) -> Result<()>;
}
