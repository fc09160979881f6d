//! Affiliation cleaning.

use tracing::debug;

use super::{CleanError, Field, check_forbidden};
use crate::rules::{Rewrite, RuleTables};

/// Cleans an affiliation cell. Returns a single-element list, or an empty
/// list when the value is missing, blacklisted, or rewritten to `null`.
///
/// # Errors
///
/// Returns [`CleanError::ForbiddenCharacter`] if the value contains a
/// forbidden character.
pub fn clean_affiliations(
    raw: Option<&str>,
    rules: &RuleTables,
) -> Result<Vec<String>, CleanError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let value = match rules.affiliation_rewrites.apply(raw.trim()) {
        Rewrite::Kept(value) => value,
        Rewrite::Dropped => {
            debug!(value = %raw.trim(), "Affiliation rewritten to null");
            return Ok(Vec::new());
        }
    };
    if rules.affiliation_blacklist.contains(&value.to_lowercase()) {
        debug!(%value, "Dropping blacklisted affiliation");
        return Ok(Vec::new());
    }
    let value = value.strip_prefix("The ").unwrap_or(value);
    check_forbidden(Field::Affiliation, value)?;

    if value.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(vec![value.to_string()])
}
