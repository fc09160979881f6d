//! Subject-predicate-object export of the reviewer set.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use csv::WriterBuilder;

use super::ExportError;
use crate::pipeline::Reviewer;

/// Relation between a reviewer and a value.
///
/// Variants are declared in alphabetical order of their labels so the
/// derived ordering sorts triples lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Predicate {
    PrimaryLanguage,
    SecondaryLanguage,
    Topic,
}

impl Predicate {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryLanguage => "primary_language",
            Self::SecondaryLanguage => "secondary_language",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(username, predicate, value)` fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
}

/// All triples of the reviewer set, deduplicated and sorted.
#[must_use]
pub fn triples(reviewers: &[Reviewer]) -> BTreeSet<Triple> {
    let mut triples = BTreeSet::new();
    for reviewer in reviewers {
        let facts = [
            (Predicate::PrimaryLanguage, &reviewer.languages_primary),
            (Predicate::SecondaryLanguage, &reviewer.languages_secondary),
            (Predicate::Topic, &reviewer.topics),
        ];
        for (predicate, values) in facts {
            for value in values {
                triples.insert(Triple {
                    subject: reviewer.username.clone(),
                    predicate,
                    object: value.clone(),
                });
            }
        }
    }
    triples
}

/// Writes triples one per line, tab-separated, without a header.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_triples(path: &Path, triples: &BTreeSet<Triple>) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ExportError::csv(path, e))?;
    for triple in triples {
        writer
            .write_record([
                triple.subject.as_str(),
                triple.predicate.as_str(),
                triple.object.as_str(),
            ])
            .map_err(|e| ExportError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))
}
