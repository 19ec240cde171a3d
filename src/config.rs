//! Minder configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main minder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinderConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat surface configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Stats aggregation configuration
    #[serde(default)]
    pub stats: StatsConfig,

    /// Classifier rule configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for durable keys (one JSON file per key)
    pub base_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minder");

        Self { base_dir: base }
    }
}

/// Chat surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Minimum simulated typing delay before a reply, in milliseconds
    pub reply_delay_min_ms: u64,

    /// Maximum simulated typing delay before a reply, in milliseconds
    pub reply_delay_max_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1000,
            reply_delay_max_ms: 2000,
        }
    }
}

/// Stats aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Polling interval for the watch view, in seconds
    pub refresh_interval_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
        }
    }
}

/// Classifier rule configuration
///
/// Each list holds regex patterns matched case-insensitively anywhere in the
/// input. The defaults reproduce the built-in rule set; a config file can
/// extend or replace them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Patterns that mark a message as task-like
    pub task_patterns: Vec<String>,

    /// Patterns that assign high priority
    pub urgency_patterns: Vec<String>,

    /// Patterns that assign medium priority (checked after urgency)
    pub importance_patterns: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            task_patterns: default_task_patterns(),
            urgency_patterns: default_urgency_patterns(),
            importance_patterns: default_importance_patterns(),
        }
    }
}

/// Default task-detection patterns: obligation phrases and task nouns.
pub fn default_task_patterns() -> Vec<String> {
    vec![
        r"need to|have to|should|must|remind me to|don't forget to".to_string(),
        r"task|todo|assignment|deadline|meeting|appointment".to_string(),
    ]
}

/// Default urgency patterns (high priority).
pub fn default_urgency_patterns() -> Vec<String> {
    vec![r"urgent|asap|immediately|emergency|critical".to_string()]
}

/// Default importance patterns (medium priority).
pub fn default_importance_patterns() -> Vec<String> {
    vec![r"important|deadline|meeting|appointment|call".to_string()]
}

impl MinderConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))
    }
}
