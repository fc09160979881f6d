//! One end-to-end run: rules, sheet, pipeline, exports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reviewers_core::{ExportSummary, PipelineOutput, RuleTables, SheetClient, pipeline, read_workbook, write_all};
use tracing::{debug, info, warn};

use super::config::PipelineConfig;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub reviewers: usize,
    pub duplicate_emails: usize,
    pub bioinformatics_reviewers: usize,
    pub triples: usize,
    pub output_dir: PathBuf,
}

impl RunSummary {
    fn new(config: &PipelineConfig, output: &PipelineOutput, export: &ExportSummary) -> Self {
        Self {
            rows_read: output.rows_read,
            rows_kept: output.rows_kept,
            reviewers: output.reviewers.len(),
            duplicate_emails: output.duplicate_emails.len(),
            bioinformatics_reviewers: export.bioinformatics_reviewers,
            triples: export.triples,
            output_dir: config.output_dir.clone(),
        }
    }

    pub(crate) fn log(&self) {
        info!(
            rows_read = self.rows_read,
            rows_kept = self.rows_kept,
            reviewers = self.reviewers,
            duplicate_emails = self.duplicate_emails,
            bioinformatics = self.bioinformatics_reviewers,
            triples = self.triples,
            output_dir = %self.output_dir.display(),
            "Run complete"
        );
    }
}

pub(crate) async fn run(config: &PipelineConfig) -> Result<RunSummary> {
    debug!(?config, "Resolved configuration");

    let rules = RuleTables::load(&config.rules_dir)
        .with_context(|| format!("Failed to load rule tables from '{}'", config.rules_dir.display()))?;

    let workbook = match &config.input {
        Some(path) => {
            info!(path = %path.display(), "Reading local workbook");
            path.clone()
        }
        None => {
            let client = SheetClient::new()?;
            client
                .ensure_cached(&config.sheet_url, &config.cache_dir, config.force)
                .await?
        }
    };

    let records = read_workbook(&workbook, config.skip_rows)?;
    if records.is_empty() {
        warn!(path = %workbook.display(), "Workbook has no data rows");
    }

    let output = pipeline::run(&records, &rules)
        .context("Reviewer sheet contains a value no rule handles; add a rewrite and rerun")?;
    let export = write_all(&config.output_dir, &output.reviewers)?;

    Ok(RunSummary::new(config, &output, &export))
}
