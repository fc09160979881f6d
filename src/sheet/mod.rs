//! Reviewer sheet access: fetch-or-cache and XLSX reading.
//!
//! The JOSS reviewer sheet is exported from Google Sheets as an XLSX
//! workbook. [`SheetClient`] keeps a cached copy on disk and
//! [`read_workbook`] turns the first worksheet into [`ReviewerRecord`]s.

mod error;
mod fetch;
mod record;

pub use error::SheetError;
pub use fetch::{CACHE_FILE_NAME, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, SheetClient};
pub use record::{DEFAULT_SKIP_ROWS, HEADER, ReviewerRecord, records_from_rows};

use std::path::Path;

use calamine::{Reader, Xlsx, open_workbook};
use tracing::{info, instrument};

/// Google Sheets export URL of the JOSS reviewer sheet.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1PAPRJ63yq9aPC1COLjaQp8mHmEq3rZUzwUYxTulyu78/export?format=xlsx";

/// Reads the first worksheet of an XLSX workbook into raw records.
///
/// # Errors
///
/// Returns [`SheetError::Workbook`] if the file cannot be opened or parsed
/// and [`SheetError::NoWorksheet`] if it contains no sheet.
#[instrument(fields(path = %path.display()))]
pub fn read_workbook(path: &Path, skip_rows: usize) -> Result<Vec<ReviewerRecord>, SheetError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| SheetError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| SheetError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let origin = range
        .start()
        .map_or((0, 0), |(row, column)| (row as usize, column as usize));
    let records = records_from_rows(range.rows(), origin, skip_rows);
    info!(rows = records.len(), "Read reviewer sheet");
    Ok(records)
}
