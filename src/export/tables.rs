//! Tab-separated and JSON tables.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{Writer, WriterBuilder};
use tracing::debug;

use super::ExportError;
use crate::pipeline::{FrequencyTable, Reviewer};
use crate::sheet::HEADER;

/// Separator between the items of a list-valued cell in TSV output.
pub const LIST_SEPARATOR: &str = "|";

pub(crate) fn tsv_writer(path: &Path) -> Result<Writer<File>, ExportError> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| ExportError::csv(path, e))
}

fn finish(mut writer: Writer<File>, path: &Path) -> Result<(), ExportError> {
    writer.flush().map_err(|e| ExportError::io(path, e))
}

/// Writes one row per reviewer with the sheet's column header.
///
/// List-valued fields are joined with [`LIST_SEPARATOR`]; a missing email is
/// an empty cell.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_reviewers_tsv(path: &Path, reviewers: &[Reviewer]) -> Result<(), ExportError> {
    let mut writer = tsv_writer(path)?;
    writer
        .write_record(HEADER)
        .map_err(|e| ExportError::csv(path, e))?;
    for reviewer in reviewers {
        writer
            .write_record(reviewer_row(reviewer))
            .map_err(|e| ExportError::csv(path, e))?;
    }
    debug!(path = %path.display(), rows = reviewers.len(), "Wrote reviewer table");
    finish(writer, path)
}

fn reviewer_row(reviewer: &Reviewer) -> [String; 10] {
    [
        reviewer.username.clone(),
        reviewer.languages_primary.join(LIST_SEPARATOR),
        reviewer.languages_secondary.join(LIST_SEPARATOR),
        reviewer.affiliations.join(LIST_SEPARATOR),
        reviewer.email.clone().unwrap_or_default(),
        reviewer.topics.join(LIST_SEPARATOR),
        reviewer.active_reviews.to_string(),
        reviewer.total_reviews.to_string(),
        reviewer.recent_year_reviews.to_string(),
        reviewer.recent_quarter_reviews.to_string(),
    ]
}

/// Writes reviewers as a pretty-printed JSON array of objects.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_reviewers_json(path: &Path, reviewers: &[Reviewer]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, reviewers).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ExportError::io(path, e))?;
    debug!(path = %path.display(), rows = reviewers.len(), "Wrote reviewer JSON");
    Ok(())
}

/// Writes a two-column frequency table headed `label`, `count`.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_frequency_tsv(
    path: &Path,
    label: &str,
    table: &FrequencyTable,
) -> Result<(), ExportError> {
    let mut writer = tsv_writer(path)?;
    writer
        .write_record([label, "count"])
        .map_err(|e| ExportError::csv(path, e))?;
    for (value, count) in table {
        writer
            .write_record([value.clone(), count.to_string()])
            .map_err(|e| ExportError::csv(path, e))?;
    }
    finish(writer, path)
}
