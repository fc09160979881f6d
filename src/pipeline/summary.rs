//! Frequency tables over the final reviewer set.

use std::collections::HashMap;

use super::Reviewer;

/// `(value, count)` pairs sorted by descending count, then ascending value.
pub type FrequencyTable = Vec<(String, usize)>;

/// Topics the bioinformatics subset is selected on.
pub const BIOINFORMATICS_TOPICS: [&str; 3] = [
    "bioinformatics",
    "computational biology",
    "networks biology",
];

/// How often each topic is listed across all reviewers.
#[must_use]
pub fn topic_counts(reviewers: &[Reviewer]) -> FrequencyTable {
    frequencies(reviewers.iter().flat_map(|r| r.topics.iter()))
}

/// How often each affiliation is listed across all reviewers.
#[must_use]
pub fn affiliation_counts(reviewers: &[Reviewer]) -> FrequencyTable {
    frequencies(reviewers.iter().flat_map(|r| r.affiliations.iter()))
}

fn frequencies<'a>(values: impl Iterator<Item = &'a String>) -> FrequencyTable {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_default() += 1;
    }
    let mut table: FrequencyTable = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

/// Whether a reviewer belongs in the bioinformatics export: writes Python,
/// has an email, and lists at least one bioinformatics topic.
#[must_use]
pub fn is_bioinformatics_python_reviewer(reviewer: &Reviewer) -> bool {
    reviewer.languages_primary.iter().any(|l| l == "python")
        && reviewer.email.is_some()
        && reviewer
            .topics
            .iter()
            .any(|t| BIOINFORMATICS_TOPICS.contains(&t.as_str()))
}

/// The bioinformatics subset, in input order.
#[must_use]
pub fn bioinformatics_subset(reviewers: &[Reviewer]) -> Vec<Reviewer> {
    reviewers
        .iter()
        .filter(|r| is_bioinformatics_python_reviewer(r))
        .cloned()
        .collect()
}
