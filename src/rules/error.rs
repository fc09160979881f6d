//! Error types for rule table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the rule tables.
///
/// Every variant is fatal at startup: the pipeline never runs with a
/// partially loaded rule set.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The rule file is missing or unreadable.
    #[error("cannot read rule file {path}: {source}\n  Suggestion: check --rules-dir points at the rule tables")]
    Read {
        /// Path of the rule file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not valid JSON of the expected shape.
    #[error("malformed rule file {path} (expected {expected}): {source}")]
    Malformed {
        /// Path of the rule file.
        path: PathBuf,
        /// Human readable description of the expected shape.
        expected: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An entry in an ordered replacement table does not map to a string.
    #[error("malformed rule file {path}: entry '{key}' must map to a string")]
    InvalidEntry {
        /// Path of the rule file.
        path: PathBuf,
        /// The offending key.
        key: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_error_read_message_mentions_path_and_suggestion() {
        let err = RulesError::Read {
            path: PathBuf::from("/rules/user_blacklist.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("user_blacklist.json"));
        assert!(msg.contains("--rules-dir"));
    }

    #[test]
    fn test_rules_error_invalid_entry_message_names_key() {
        let err = RulesError::InvalidEntry {
            path: PathBuf::from("topic_interjections.json"),
            key: "(e.g.".to_string(),
        };
        assert!(err.to_string().contains("'(e.g.'"));
    }
}
