//! The normalized reviewer record and per-row cleaning.

use serde::Serialize;
use tracing::trace;

use crate::clean::{CleanError, clean_affiliations, clean_languages, clean_topics, clean_username};
use crate::rules::RuleTables;
use crate::sheet::ReviewerRecord;

/// A cleaned reviewer. After aggregation there is exactly one per username.
///
/// Field order matches [`crate::sheet::HEADER`] and is the column order of
/// every exported table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reviewer {
    pub username: String,
    pub languages_primary: Vec<String>,
    pub languages_secondary: Vec<String>,
    pub affiliations: Vec<String>,
    pub email: Option<String>,
    pub topics: Vec<String>,
    pub active_reviews: i64,
    pub total_reviews: i64,
    pub recent_year_reviews: i64,
    pub recent_quarter_reviews: i64,
}

/// Cleans one raw row.
///
/// Returns `Ok(None)` when the row has no usable username, no topics, or no
/// primary language; such rows are excluded from every output. Fields are
/// cleaned in that order and cleaning stops at the first missing required
/// field.
///
/// # Errors
///
/// Propagates [`CleanError`] from the field cleaners.
pub fn clean_record(
    record: &ReviewerRecord,
    rules: &RuleTables,
) -> Result<Option<Reviewer>, CleanError> {
    let Some(username) = clean_username(record.username.as_deref(), rules)? else {
        return Ok(None);
    };
    let topics = clean_topics(record.topics.as_deref(), rules)?;
    if topics.is_empty() {
        trace!(%username, "Row has no topics");
        return Ok(None);
    }
    let affiliations = clean_affiliations(record.affiliations.as_deref(), rules)?;
    let languages_primary = clean_languages(record.languages_primary.as_deref(), rules)?;
    if languages_primary.is_empty() {
        trace!(%username, "Row has no primary language");
        return Ok(None);
    }
    let languages_secondary = clean_languages(record.languages_secondary.as_deref(), rules)?;
    let email = record
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(String::from);

    Ok(Some(Reviewer {
        username,
        languages_primary,
        languages_secondary,
        affiliations,
        email,
        topics,
        active_reviews: record.active_reviews,
        total_reviews: record.total_reviews,
        recent_year_reviews: record.recent_year_reviews,
        recent_quarter_reviews: record.recent_quarter_reviews,
    }))
}
