//! Text classifier for task detection, priority assignment, and canned replies
//!
//! Pure and stateless: every operation is a function of its input text plus
//! the rule set compiled at construction. Rules come from
//! [`ClassifierConfig`](crate::config::ClassifierConfig); the defaults
//! reproduce the built-in pattern sets.

use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use crate::tasks::Priority;
use rand::seq::SliceRandom;
use regex::{Regex, RegexBuilder};

/// Acknowledgement when a message is recognized as a task.
const TASK_REPLY: &str = "I've noted that task for you! You can see all your tasks in the Tasks section. Is there anything specific about this task you'd like me to remember?";

/// Reply when the user asks for help with a problem.
const HELP_REPLY: &str = "I'm here to help you solve that problem! Can you tell me more details about what you're facing? I'll break it down into manageable steps.";

/// Acknowledgement when the user asks to remember something.
const MEMORY_REPLY: &str = "I'll remember that information for you. I keep track of our conversations and important details you share with me.";

/// Reply for scheduling-related messages.
const SCHEDULE_REPLY: &str = "I can help you organize your schedule! While I don't have calendar integration yet, I can help you plan and remember important dates and deadlines.";

/// Generic acknowledgements used when no specific branch matches.
/// The pick is randomized; tests assert membership, not equality.
pub const DEFAULT_REPLIES: [&str; 5] = [
    "That's interesting! Tell me more about that.",
    "I understand. How can I help you with this?",
    "Got it! What would you like to do next?",
    "Thanks for sharing that with me. I'll remember this information.",
    "That makes sense. Is there a specific way you'd like me to assist with this?",
];

/// Compiled text classifier.
pub struct Classifier {
    task_rules: Vec<Regex>,
    urgency_rules: Vec<Regex>,
    importance_rules: Vec<Regex>,
}

impl Classifier {
    /// Compile a classifier from the given rule configuration.
    ///
    /// Fails only on an invalid regex pattern (possible when rules come from
    /// a user config file).
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self {
            task_rules: compile_rules(&config.task_patterns)?,
            urgency_rules: compile_rules(&config.urgency_patterns)?,
            importance_rules: compile_rules(&config.importance_patterns)?,
        })
    }

    /// Whether the text looks like a task.
    ///
    /// Case-insensitive, unanchored, no negation handling: "I don't have a
    /// task" still matches.
    pub fn looks_like_task(&self, text: &str) -> bool {
        self.task_rules.iter().any(|r| r.is_match(text))
    }

    /// Priority for a task created from the text.
    ///
    /// Tiers are checked in fixed order: urgency first, then importance,
    /// falling through to `Low`.
    pub fn priority_of(&self, text: &str) -> Priority {
        if self.urgency_rules.iter().any(|r| r.is_match(text)) {
            return Priority::High;
        }
        if self.importance_rules.iter().any(|r| r.is_match(text)) {
            return Priority::Medium;
        }
        Priority::Low
    }

    /// Produce a reply for a chat message.
    ///
    /// A fixed priority list of substring checks on the lower-cased input;
    /// only the final fallthrough branch is randomized. This does not write
    /// any state — the caller routes task-like text to the task store.
    pub fn respond_to(&self, text: &str) -> String {
        let lower = text.to_lowercase();

        if lower.contains("task") || lower.contains("todo") {
            return TASK_REPLY.to_string();
        }
        if lower.contains("problem") || lower.contains("help") || lower.contains("stuck") {
            return HELP_REPLY.to_string();
        }
        if lower.contains("remember") || lower.contains("note") {
            return MEMORY_REPLY.to_string();
        }
        if lower.contains("schedule") || lower.contains("time") || lower.contains("when") {
            return SCHEDULE_REPLY.to_string();
        }

        let mut rng = rand::thread_rng();
        DEFAULT_REPLIES
            .choose(&mut rng)
            .copied()
            .unwrap_or(DEFAULT_REPLIES[0])
            .to_string()
    }
}

/// Compile a pattern list case-insensitively.
fn compile_rules(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::Classifier(format!("Invalid pattern '{}': {}", p, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_classifier() -> Classifier {
        Classifier::new(&ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_looks_like_task_obligation() {
        let classifier = create_test_classifier();
        assert!(classifier.looks_like_task("I need to submit the report"));
        assert!(classifier.looks_like_task("remind me to water the plants"));
        assert!(classifier.looks_like_task("Don't forget to call mom"));
    }

    #[test]
    fn test_looks_like_task_nouns() {
        let classifier = create_test_classifier();
        assert!(classifier.looks_like_task("the deadline is Friday"));
        assert!(classifier.looks_like_task("We have a MEETING tomorrow"));
    }

    #[test]
    fn test_looks_like_task_negative() {
        let classifier = create_test_classifier();
        assert!(!classifier.looks_like_task("I like pizza"));
        assert!(!classifier.looks_like_task(""));
    }

    #[test]
    fn test_no_negation_handling() {
        // Matching is substring-based with no negation awareness
        let classifier = create_test_classifier();
        assert!(classifier.looks_like_task("I don't have a task"));
    }

    #[test]
    fn test_priority_tiers() {
        let classifier = create_test_classifier();
        assert_eq!(
            classifier.priority_of("This is urgent, call me asap"),
            Priority::High
        );
        assert_eq!(
            classifier.priority_of("Don't forget the meeting"),
            Priority::Medium
        );
        assert_eq!(classifier.priority_of("nice weather today"), Priority::Low);
    }

    #[test]
    fn test_priority_urgency_wins_over_importance() {
        let classifier = create_test_classifier();
        assert_eq!(
            classifier.priority_of("urgent: prepare for the meeting"),
            Priority::High
        );
    }

    #[test]
    fn test_priority_never_fails() {
        let classifier = create_test_classifier();
        assert_eq!(classifier.priority_of(""), Priority::Low);
        assert_eq!(classifier.priority_of("こんにちは 🦀"), Priority::Low);
    }

    #[test]
    fn test_respond_to_branches() {
        let classifier = create_test_classifier();
        assert_eq!(classifier.respond_to("add a task for me"), TASK_REPLY);
        assert_eq!(classifier.respond_to("I'm stuck on a problem"), HELP_REPLY);
        assert_eq!(classifier.respond_to("please remember this"), MEMORY_REPLY);
        assert_eq!(classifier.respond_to("what's my schedule?"), SCHEDULE_REPLY);
    }

    #[test]
    fn test_respond_to_branch_order() {
        // "task" is checked before "help", so a message containing both
        // gets the task acknowledgement.
        let classifier = create_test_classifier();
        assert_eq!(classifier.respond_to("help me with this task"), TASK_REPLY);
    }

    #[test]
    fn test_respond_to_default_pool() {
        let classifier = create_test_classifier();
        for _ in 0..20 {
            let reply = classifier.respond_to("the sky is blue");
            assert!(DEFAULT_REPLIES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = ClassifierConfig {
            task_patterns: vec!["(unclosed".to_string()],
            ..ClassifierConfig::default()
        };
        assert!(Classifier::new(&config).is_err());
    }
}
