//! JOSS Reviewer Normalizer Core Library
//!
//! This library turns the hand-maintained JOSS reviewer sheet into clean,
//! deduplicated reviewer records and a set of flat-file exports.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`rules`] - Rule tables (blacklists, rewrites, mappings) loaded from JSON
//! - [`clean`] - Pure per-field cleaners driven by the rule tables
//! - [`sheet`] - Fetch-or-cache of the sheet export and XLSX reading
//! - [`pipeline`] - Row filtering, aggregation by username, summaries
//! - [`export`] - TSV, JSON and triples outputs

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clean;
pub mod export;
pub mod pipeline;
pub mod rules;
pub mod sheet;

// Re-export commonly used types
pub use clean::{CleanError, Field};
pub use export::{ExportError, ExportSummary, write_all};
pub use pipeline::{PipelineOutput, Reviewer};
pub use rules::{Rewrite, RuleTables, RulesError};
pub use sheet::{ReviewerRecord, SheetClient, SheetError, read_workbook};
