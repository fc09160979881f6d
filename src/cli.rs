//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Normalize the JOSS reviewer sheet into flat-file exports.
///
/// Downloads (or reuses a cached copy of) the reviewer spreadsheet, cleans
/// every field against the JSON rule tables, merges rows by username and
/// writes TSV, JSON and triples outputs.
#[derive(Parser, Debug)]
#[command(name = "reviewers")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Re-download the sheet even when a cached copy exists
    #[arg(short, long)]
    pub force: bool,

    /// Read this XLSX file instead of fetching the sheet
    #[arg(short, long, value_name = "XLSX", conflicts_with = "force")]
    pub input: Option<PathBuf>,

    /// Directory holding the JSON rule tables
    #[arg(short, long, value_name = "DIR")]
    pub rules_dir: Option<PathBuf>,

    /// Directory the exports are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory the downloaded sheet is cached in
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Sheet export URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub sheet_url: Option<String>,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Default tracing level for the flags given.
    ///
    /// Quiet wins over verbose.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
