//! Memory item record type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of memory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    Note,
    Conversation,
    Preference,
    Fact,
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryType::Note => write!(f, "note"),
            MemoryType::Conversation => write!(f, "conversation"),
            MemoryType::Preference => write!(f, "preference"),
            MemoryType::Fact => write!(f, "fact"),
        }
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "note" => Ok(MemoryType::Note),
            "conversation" => Ok(MemoryType::Conversation),
            "preference" => Ok(MemoryType::Preference),
            "fact" => Ok(MemoryType::Fact),
            other => Err(format!("unknown memory type '{}'", other)),
        }
    }
}

/// How important a memory item is. Independent of task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

/// A persisted memory record.
///
/// Wire format: camelCase keys, lowercase enum values, RFC 3339 timestamp,
/// `tags` omitted when absent. Tags are carried for compatibility but no
/// logic consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: MemoryType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
    pub importance: Importance,
}

impl MemoryItem {
    /// Create a new item of the given kind with medium importance.
    pub fn new(kind: MemoryType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            tags: None,
            timestamp: Utc::now(),
            importance: Importance::Medium,
        }
    }

    /// Create a plain note.
    pub fn note(content: impl Into<String>) -> Self {
        Self::new(MemoryType::Note, content)
    }

    /// Create a conversation-turn record.
    pub fn conversation(content: impl Into<String>) -> Self {
        Self::new(MemoryType::Conversation, content)
    }
}
