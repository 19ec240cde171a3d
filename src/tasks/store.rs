//! Task store with snapshot persistence
//!
//! Owns the task collection in memory for the process lifetime and rewrites
//! the full durable snapshot after every mutation. Ordering is newest first:
//! new tasks are prepended.

use super::task::Task;
use crate::classifier::Classifier;
use crate::error::Result;
use crate::storage::{Storage, TASKS_KEY};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// CRUD surface over the task collection.
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
    storage: Arc<dyn Storage>,
    classifier: Arc<Classifier>,
}

impl TaskStore {
    /// Open the store, loading the persisted collection.
    ///
    /// An absent or malformed snapshot yields an empty collection; it is not
    /// an error.
    pub async fn open(storage: Arc<dyn Storage>, classifier: Arc<Classifier>) -> Result<Self> {
        let tasks = match storage.load(TASKS_KEY).await? {
            Some(payload) => match serde_json::from_str::<Vec<Task>>(&payload) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(key = TASKS_KEY, error = %e, "malformed snapshot, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!(count = tasks.len(), "task store loaded");

        Ok(Self {
            tasks: RwLock::new(tasks),
            storage,
            classifier,
        })
    }

    /// Add a task, classifying its priority from the text.
    ///
    /// Empty or whitespace-only text is silently rejected and returns `None`.
    pub async fn add(&self, text: &str) -> Result<Option<Task>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let priority = self.classifier.priority_of(text);
        let task = Task::new(text, priority);

        let mut tasks = self.tasks.write().await;
        tasks.insert(0, task.clone());
        self.persist(&tasks).await?;

        tracing::debug!(id = %task.id, %priority, "task added");
        Ok(Some(task))
    }

    /// Route a chat message that classified as task-like into the store.
    ///
    /// Behaves exactly as [`add`](Self::add); the conversation turn is
    /// recorded separately by the memory store, with no cross-reference.
    pub async fn ingest_from_chat(&self, text: &str) -> Result<Option<Task>> {
        self.add(text).await
    }

    /// Flip `completed` on the task with the given ID.
    ///
    /// Returns `false` (and changes nothing) when no task matches. Toggling
    /// twice restores the original state.
    pub async fn toggle(&self, id: Uuid) -> Result<bool> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        let completed = task.completed;

        self.persist(&tasks).await?;
        tracing::debug!(%id, completed, "task toggled");
        Ok(true)
    }

    /// Remove the task with the given ID. Returns `false` when absent.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        self.persist(&tasks).await?;
        tracing::debug!(%id, "task deleted");
        Ok(true)
    }

    /// All tasks, newest first.
    pub async fn all(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Tasks not yet completed, preserving insertion order.
    pub async fn pending(&self) -> Vec<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|t| !t.completed)
            .cloned()
            .collect()
    }

    /// Completed tasks, preserving insertion order.
    pub async fn completed(&self) -> Vec<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|t| t.completed)
            .cloned()
            .collect()
    }

    /// Number of tasks in the collection.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Rewrite the full durable snapshot.
    async fn persist(&self, tasks: &[Task]) -> Result<()> {
        let payload = serde_json::to_string(tasks)?;
        self.storage.save(TASKS_KEY, &payload).await
    }
}
