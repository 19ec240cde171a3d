//! Chat surface wiring: classifier + both stores
//!
//! One user message fans out three ways: it is recorded as a conversation
//! turn, routed to the task store when it classifies as task-like, and
//! answered with a canned reply. A task-like message therefore lands in BOTH
//! collections, with no cross-reference between the two records.

use crate::classifier::Classifier;
use crate::config::ChatConfig;
use crate::error::Result;
use crate::memory::MemoryStore;
use crate::tasks::{Task, TaskStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Greeting printed when a chat session starts.
pub const GREETING: &str = "Hi! I'm your personal assistant. I can help you solve problems, manage tasks, and remember important information. What can I help you with today?";

/// Outcome of handling one user message.
#[derive(Debug)]
pub struct Exchange {
    /// The assistant's reply.
    pub reply: String,
    /// The task created from this message, when it classified as task-like.
    pub extracted_task: Option<Task>,
}

/// Stateless message handler over the two stores.
pub struct Assistant {
    classifier: Arc<Classifier>,
    tasks: Arc<TaskStore>,
    memories: Arc<MemoryStore>,
}

impl Assistant {
    pub fn new(
        classifier: Arc<Classifier>,
        tasks: Arc<TaskStore>,
        memories: Arc<MemoryStore>,
    ) -> Self {
        Self {
            classifier,
            tasks,
            memories,
        }
    }

    /// Handle one user message. Returns `None` for empty input.
    pub async fn handle_message(&self, text: &str) -> Result<Option<Exchange>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        self.memories.record_conversation_turn(text).await?;

        let extracted_task = if self.classifier.looks_like_task(text) {
            self.tasks.ingest_from_chat(text).await?
        } else {
            None
        };

        let reply = self.classifier.respond_to(text);

        Ok(Some(Exchange {
            reply,
            extracted_task,
        }))
    }
}

/// Random simulated typing delay within the configured range.
pub fn typing_delay(config: &ChatConfig) -> Duration {
    let min = config.reply_delay_min_ms;
    let max = config.reply_delay_max_ms.max(min);
    Duration::from_millis(rand::thread_rng().gen_range(min..=max))
}
