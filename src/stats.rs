//! Read-only stats aggregation over both durable collections
//!
//! Snapshots re-read the durable keys fresh through the storage port rather
//! than the live store instances, so the watch view observes writes from the
//! stores without any callback wiring, at the cost of one polling interval
//! of lag.

use crate::memory::{MemoryItem, MemoryType};
use crate::storage::{Storage, MEMORY_KEY, TASKS_KEY};
use crate::tasks::Task;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Aggregated counters over both collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded percentage; 0 when there are no tasks.
    pub completion_rate: u32,
    pub total_memories: usize,
    pub conversation_count: usize,
}

/// Computes [`StatsSnapshot`]s from durable state.
pub struct StatsAggregator {
    storage: Arc<dyn Storage>,
}

impl StatsAggregator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Compute a snapshot from the current durable state.
    ///
    /// Absent or malformed payloads count as empty collections; this never
    /// fails on bad data, only on a storage read error.
    pub async fn snapshot(&self) -> crate::Result<StatsSnapshot> {
        let tasks = load_lenient::<Task>(&*self.storage, TASKS_KEY).await?;
        let memories = load_lenient::<MemoryItem>(&*self.storage, MEMORY_KEY).await?;

        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total_tasks > 0 {
            ((completed_tasks as f64 / total_tasks as f64) * 100.0).round() as u32
        } else {
            0
        };

        Ok(StatsSnapshot {
            total_tasks,
            completed_tasks,
            completion_rate,
            total_memories: memories.len(),
            conversation_count: memories
                .iter()
                .filter(|m| m.kind == MemoryType::Conversation)
                .count(),
        })
    }

    /// Start a polling refresh loop, returning a watch channel that carries
    /// the latest snapshot. The loop ends when every receiver is dropped.
    pub async fn subscribe(
        self: Arc<Self>,
        interval: Duration,
    ) -> crate::Result<watch::Receiver<StatsSnapshot>> {
        let initial = self.snapshot().await?;
        let (tx, rx) = watch::channel(initial);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it, we already sent the
            // initial snapshot.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match self.snapshot().await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "stats refresh failed"),
                }
            }
        });

        Ok(rx)
    }
}

/// Parse a durable JSON array, treating absent or malformed data as empty.
async fn load_lenient<T: serde::de::DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> crate::Result<Vec<T>> {
    Ok(match storage.load(key).await? {
        Some(payload) => serde_json::from_str(&payload).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "malformed snapshot, counting as empty");
            Vec::new()
        }),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::config::ClassifierConfig;
    use crate::memory::MemoryStore;
    use crate::storage::InMemoryStorage;
    use crate::tasks::TaskStore;

    async fn make_world() -> (TaskStore, MemoryStore, StatsAggregator) {
        let storage = Arc::new(InMemoryStorage::new());
        let classifier = Arc::new(Classifier::new(&ClassifierConfig::default()).unwrap());
        let tasks = TaskStore::open(storage.clone(), classifier).await.unwrap();
        let memories = MemoryStore::open(storage.clone()).await.unwrap();
        (tasks, memories, StatsAggregator::new(storage))
    }

    #[tokio::test]
    async fn test_empty_state_is_all_zeroes() {
        let (_, _, stats) = make_world().await;
        let snapshot = stats.snapshot().await.unwrap();
        assert_eq!(snapshot, StatsSnapshot::default());
    }

    #[tokio::test]
    async fn test_completion_rate_zero_tasks_is_zero() {
        let (_, _, stats) = make_world().await;
        assert_eq!(stats.snapshot().await.unwrap().completion_rate, 0);
    }

    #[tokio::test]
    async fn test_completion_rate_rounds() {
        let (tasks, _, stats) = make_world().await;

        let done = tasks.add("one").await.unwrap().unwrap();
        tasks.add("two").await.unwrap();
        tasks.add("three").await.unwrap();
        tasks.toggle(done.id).await.unwrap();

        let snapshot = stats.snapshot().await.unwrap();
        assert_eq!(snapshot.total_tasks, 3);
        assert_eq!(snapshot.completed_tasks, 1);
        assert_eq!(snapshot.completion_rate, 33);
    }

    #[tokio::test]
    async fn test_conversation_count() {
        let (_, memories, stats) = make_world().await;

        memories.add_note("a note").await.unwrap();
        memories.record_conversation_turn("hi there").await.unwrap();
        memories.record_conversation_turn("bye now").await.unwrap();

        let snapshot = stats.snapshot().await.unwrap();
        assert_eq!(snapshot.total_memories, 3);
        assert_eq!(snapshot.conversation_count, 2);
    }

    #[tokio::test]
    async fn test_reads_durable_state_not_store_instances() {
        // A second writer through the same storage is visible without any
        // callback wiring.
        let storage = Arc::new(InMemoryStorage::new());
        let stats = StatsAggregator::new(storage.clone());

        storage
            .save(TASKS_KEY, r#"[{"id":"6f6f4f4e-8c2b-4b8a-9d1e-111111111111","text":"x","completed":true,"createdAt":"2026-01-05T10:00:00Z","priority":"low"}]"#)
            .await
            .unwrap();

        let snapshot = stats.snapshot().await.unwrap();
        assert_eq!(snapshot.total_tasks, 1);
        assert_eq!(snapshot.completed_tasks, 1);
        assert_eq!(snapshot.completion_rate, 100);
    }

    #[tokio::test]
    async fn test_malformed_payloads_count_as_empty() {
        let storage = Arc::new(InMemoryStorage::with_entries([
            (TASKS_KEY.to_string(), "broken".to_string()),
            (MEMORY_KEY.to_string(), "42".to_string()),
        ]));
        let stats = StatsAggregator::new(storage);

        let snapshot = stats.snapshot().await.unwrap();
        assert_eq!(snapshot, StatsSnapshot::default());
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_snapshot() {
        let storage = Arc::new(InMemoryStorage::new());
        let stats = Arc::new(StatsAggregator::new(storage));
        let rx = stats.subscribe(Duration::from_millis(10)).await.unwrap();
        assert_eq!(*rx.borrow(), StatsSnapshot::default());
    }

    #[tokio::test]
    async fn test_subscribe_observes_later_writes() {
        let storage = Arc::new(InMemoryStorage::new());
        let stats = Arc::new(StatsAggregator::new(storage.clone()));
        let mut rx = stats
            .subscribe(Duration::from_millis(5))
            .await
            .unwrap();

        storage
            .save(MEMORY_KEY, r#"[{"id":"6f6f4f4e-8c2b-4b8a-9d1e-222222222222","type":"conversation","content":"hi","timestamp":"2026-01-05T10:00:00Z","importance":"medium"}]"#)
            .await
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().conversation_count, 1);
    }
}
