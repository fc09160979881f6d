//! Raw reviewer rows as read from the sheet.

use calamine::Data;
use tracing::{trace, warn};

/// Column names, in sheet order. The sheet's own header rows are skipped
/// and columns are mapped positionally onto this list.
pub const HEADER: [&str; 10] = [
    "username",
    "languages_primary",
    "languages_secondary",
    "affiliations",
    "email",
    "topics",
    "active_reviews",
    "total_reviews",
    "recent_year_reviews",
    "recent_quarter_reviews",
];

/// Number of leading rows (title and header) before the first reviewer.
pub const DEFAULT_SKIP_ROWS: usize = 2;

static EMPTY_CELL: Data = Data::Empty;

/// One uncleaned row of the reviewer sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerRecord {
    pub username: Option<String>,
    pub languages_primary: Option<String>,
    pub languages_secondary: Option<String>,
    pub affiliations: Option<String>,
    pub email: Option<String>,
    pub topics: Option<String>,
    pub active_reviews: i64,
    pub total_reviews: i64,
    pub recent_year_reviews: i64,
    pub recent_quarter_reviews: i64,
}

impl ReviewerRecord {
    /// Builds a record from one row of cells.
    ///
    /// Missing trailing cells are treated as empty. Language columns accept
    /// numeric cells as text; the other text columns only take string cells.
    #[must_use]
    pub fn from_cells(cells: &[Data]) -> Self {
        Self::from_cells_at(cells, 0)
    }

    /// Like [`from_cells`](Self::from_cells) for a row whose first cell sits
    /// in sheet column `first_column` (zero-based); earlier columns are empty.
    #[must_use]
    pub fn from_cells_at(cells: &[Data], first_column: usize) -> Self {
        let cell = |index: usize| {
            index
                .checked_sub(first_column)
                .and_then(|offset| cells.get(offset))
                .unwrap_or(&EMPTY_CELL)
        };
        Self {
            username: string_cell(cell(0)),
            languages_primary: text_cell(cell(1)),
            languages_secondary: text_cell(cell(2)),
            affiliations: string_cell(cell(3)),
            email: string_cell(cell(4)),
            topics: string_cell(cell(5)),
            active_reviews: count_cell(cell(6)),
            total_reviews: count_cell(cell(7)),
            recent_year_reviews: count_cell(cell(8)),
            recent_quarter_reviews: count_cell(cell(9)),
        }
    }
}

/// Converts worksheet rows to records.
///
/// `origin` is the zero-based `(row, column)` of the first cell of `rows` in
/// the sheet. Row skipping and column mapping count from sheet row 1 and
/// column A, so leading blank rows or columns trimmed off by the reader do
/// not shift them. The first `skip_rows` sheet rows and rows that are
/// entirely empty are skipped.
#[must_use]
pub fn records_from_rows<'a, I>(rows: I, origin: (usize, usize), skip_rows: usize) -> Vec<ReviewerRecord>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let (first_row, first_column) = origin;
    let mut records = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        let sheet_row = first_row + index;
        if sheet_row < skip_rows {
            continue;
        }
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            trace!(row = sheet_row + 1, "Skipping empty row");
            continue;
        }
        if first_column + row.len() > HEADER.len() {
            warn!(
                row = sheet_row + 1,
                cells = first_column + row.len(),
                "Row has more cells than known columns; extra cells ignored"
            );
        }
        records.push(ReviewerRecord::from_cells_at(row, first_column));
    }
    records
}

fn string_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn text_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        other => string_cell(other),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn count_cell(cell: &Data) -> i64 {
    match cell {
        Data::Int(i) => *i,
        Data::Float(f) if f.is_finite() => f.trunc() as i64,
        Data::String(s) => s.trim().parse::<f64>().map_or(0, |f| {
            if f.is_finite() { f.trunc() as i64 } else { 0 }
        }),
        _ => 0,
    }
}
