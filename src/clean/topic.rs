//! Research topic cleaning.

use tracing::debug;

use super::{CleanError, Field, check_forbidden};
use crate::rules::{Rewrite, RuleTables};

/// Cleans a free-text topic cell into a list of lowercase topics.
///
/// Topics keep the order in which they first appear. Duplicates are not
/// removed here; the aggregation pass merges topic lists as sets.
///
/// # Errors
///
/// Returns [`CleanError::ForbiddenCharacter`] if the value still contains a
/// forbidden character after the interjection replacements.
pub fn clean_topics(raw: Option<&str>, rules: &RuleTables) -> Result<Vec<String>, CleanError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let mut value = match rules.topic_rewrites.apply(raw.trim()) {
        Rewrite::Kept(value) => value.to_string(),
        Rewrite::Dropped => {
            debug!(value = %raw.trim(), "Topic value rewritten to null");
            return Ok(Vec::new());
        }
    };
    for (interjection, replacement) in &rules.topic_interjections {
        if interjection.is_empty() {
            continue;
        }
        value = value
            .replace(interjection.as_str(), replacement)
            .trim()
            .to_string();
    }
    check_forbidden(Field::Topic, &value)?;

    let value = value
        .replace([';', '/'], ",")
        .replace("  ", " ")
        .to_lowercase()
        .replace("modelling", "modeling");
    if value.contains('.') {
        debug!(%value, "FIXME (topic): value contains a period");
    }

    let mut topics = Vec::new();
    for line in value.lines().map(str::trim).filter(|line| !line.is_empty()) {
        for item in line.split(',') {
            let item = item.trim().trim_end_matches('.').trim_end();
            if item.is_empty() {
                continue;
            }
            let topic = rules.topic_mapping.get(item).map_or(item, String::as_str);
            if rules.topic_blacklist.contains(topic) {
                continue;
            }
            topics.push(topic.to_string());
        }
    }
    Ok(topics)
}
