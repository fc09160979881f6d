//! Output artifacts derived from the final reviewer set.
//!
//! Every artifact is regenerated on each run and written independently of
//! the others:
//!
//! | File | Content |
//! |------|---------|
//! | `topics.tsv` | topic frequency table |
//! | `affiliations.tsv` | affiliation frequency table |
//! | `full_table.tsv`, `full.json` | every reviewer |
//! | `bioinfo.tsv`, `bioinfo.json` | Python reviewers with an email and a bioinformatics topic |
//! | `triples.tsv` | `(username, predicate, value)` facts |

mod error;
mod tables;
mod triples;

pub use error::ExportError;
pub use tables::{LIST_SEPARATOR, write_frequency_tsv, write_reviewers_json, write_reviewers_tsv};
pub use triples::{Predicate, Triple, triples, write_triples};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::pipeline::{Reviewer, affiliation_counts, bioinformatics_subset, topic_counts};

pub const TOPICS_FILE: &str = "topics.tsv";
pub const AFFILIATIONS_FILE: &str = "affiliations.tsv";
pub const FULL_TSV_FILE: &str = "full_table.tsv";
pub const FULL_JSON_FILE: &str = "full.json";
pub const BIOINFO_TSV_FILE: &str = "bioinfo.tsv";
pub const BIOINFO_JSON_FILE: &str = "bioinfo.json";
pub const TRIPLES_FILE: &str = "triples.tsv";

/// What [`write_all`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
    pub reviewers: usize,
    pub topics: usize,
    pub affiliations: usize,
    pub bioinformatics_reviewers: usize,
    pub triples: usize,
}

/// Writes every artifact into `output_dir`, creating it if needed.
///
/// `reviewers` is expected to be the output of
/// [`pipeline::run`](crate::pipeline::run): one entry per username, sorted.
///
/// # Errors
///
/// Returns [`ExportError`] on the first file that cannot be written.
#[instrument(skip(reviewers), fields(output_dir = %output_dir.display(), reviewers = reviewers.len()))]
pub fn write_all(output_dir: &Path, reviewers: &[Reviewer]) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(output_dir).map_err(|e| ExportError::io(output_dir, e))?;
    let mut files = Vec::new();
    let mut target = |name: &str| {
        let path = output_dir.join(name);
        files.push(path.clone());
        path
    };

    let topics = topic_counts(reviewers);
    write_frequency_tsv(&target(TOPICS_FILE), "topic", &topics)?;
    let affiliations = affiliation_counts(reviewers);
    write_frequency_tsv(&target(AFFILIATIONS_FILE), "affiliation", &affiliations)?;

    write_reviewers_tsv(&target(FULL_TSV_FILE), reviewers)?;
    write_reviewers_json(&target(FULL_JSON_FILE), reviewers)?;

    let subset = bioinformatics_subset(reviewers);
    write_reviewers_tsv(&target(BIOINFO_TSV_FILE), &subset)?;
    write_reviewers_json(&target(BIOINFO_JSON_FILE), &subset)?;

    let triples = triples(reviewers);
    write_triples(&target(TRIPLES_FILE), &triples)?;

    let summary = ExportSummary {
        files,
        reviewers: reviewers.len(),
        topics: topics.len(),
        affiliations: affiliations.len(),
        bioinformatics_reviewers: subset.len(),
        triples: triples.len(),
    };
    info!(
        files = summary.files.len(),
        topics = summary.topics,
        affiliations = summary.affiliations,
        bioinformatics = summary.bioinformatics_reviewers,
        triples = summary.triples,
        "Wrote output artifacts"
    );
    Ok(summary)
}
