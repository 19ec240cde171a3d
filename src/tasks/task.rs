//! Task record type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority, assigned once at creation and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// A persisted to-do record.
///
/// Serialized field names and enum values match the durable wire format
/// (camelCase keys, lowercase priority, RFC 3339 timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
}

impl Task {
    /// Create a new pending task.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("buy milk", Priority::Low);
        assert!(!task.completed);
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_wire_format() {
        let task = Task::new("call the bank", Priority::High);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["text"], "call the bank");
        assert_eq!(json["completed"], false);
        assert_eq!(json["priority"], "high");
        assert!(json["createdAt"].is_string());
        assert!(json["id"].is_string());
    }

    #[test]
    fn test_round_trip() {
        let task = Task::new("review notes", Priority::Medium);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}
