//! Batch transform from raw sheet rows to the final reviewer set.
//!
//! Stages, in order:
//! 1. clean every field of every row ([`clean_record`]), excluding rows
//!    without username, topics, or primary language;
//! 2. merge rows sharing a username ([`aggregate`]);
//! 3. report emails shared between usernames ([`duplicate_emails`]);
//! 4. keep the last row per username ([`drop_duplicate_usernames`]).
//!
//! Summary tables and the bioinformatics subset are derived from the result
//! by the functions in [`summary`].

mod aggregate;
mod reviewer;
pub mod summary;

pub use aggregate::{aggregate, drop_duplicate_usernames, duplicate_emails};
pub use reviewer::{Reviewer, clean_record};
pub use summary::{
    BIOINFORMATICS_TOPICS, FrequencyTable, affiliation_counts, bioinformatics_subset,
    is_bioinformatics_python_reviewer, topic_counts,
};

use tracing::{info, instrument};

use crate::clean::CleanError;
use crate::rules::RuleTables;
use crate::sheet::ReviewerRecord;

/// Result of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// One reviewer per username, sorted by username.
    pub reviewers: Vec<Reviewer>,
    /// Number of raw rows read from the sheet.
    pub rows_read: usize,
    /// Number of rows that passed the required-field filter.
    pub rows_kept: usize,
    /// Emails shared by more than one username.
    pub duplicate_emails: Vec<(String, usize)>,
}

/// Runs cleaning, filtering, aggregation and de-duplication.
///
/// # Errors
///
/// Returns [`CleanError`] as soon as any row contains a forbidden character;
/// no partial output is produced.
#[instrument(skip(records, rules), fields(rows = records.len()))]
pub fn run(records: &[ReviewerRecord], rules: &RuleTables) -> Result<PipelineOutput, CleanError> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        if let Some(reviewer) = clean_record(record, rules)? {
            rows.push(reviewer);
        }
    }
    let rows_kept = rows.len();
    info!(
        rows_read = records.len(),
        rows_kept, "Cleaned and filtered rows"
    );

    let reviewers = aggregate(rows);
    let duplicate_emails = duplicate_emails(&reviewers);
    let reviewers = drop_duplicate_usernames(reviewers);
    info!(reviewers = reviewers.len(), "Aggregated reviewers");

    Ok(PipelineOutput {
        reviewers,
        rows_read: records.len(),
        rows_kept,
        duplicate_emails,
    })
}
