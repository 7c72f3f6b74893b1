//! # Table Specifications and Results
//!
//! A [`TableSpec`] is the caller's geometric hint for where one table lives
//! in a grid; an [`ExtractionResult`] is what the engine returns for it.
use crate::error::SheetBlocksError;
use crate::spreadsheet::cell::CellValue;
use crate::table::range::Range;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod column;
pub mod range;

/// One extracted row: flattened column name to cell value, in header order.
pub type Record = IndexMap<String, CellValue>;

const DEFAULT_HEADER_ROWS: usize = 1;
const DEFAULT_MAX_BLANK_STREAK: usize = 1;

/// Errors raised while constructing a table specification.
#[derive(Error, Debug, PartialEq)]
pub enum SpecError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Table name must not be blank")]
    BlankName,

    #[error("Invalid max_blank_streak {0} for table '{1}': must be at least 1")]
    InvalidBlankStreak(usize, String),
}

/// Loosely-typed table specification as received from a caller.
/// Every field is optional here; [`TableSpec::try_from`] validates it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTableSpec {
    pub name: Option<String>,
    pub start_row: Option<usize>,
    pub left_col: Option<usize>,
    pub right_col: Option<usize>,
    pub header_rows: Option<usize>,
    pub end_row: Option<usize>,
    pub max_blank_streak: Option<usize>,
    pub date_row: Option<usize>,
}

/// Validated, immutable description of one table block. Coordinates are 1-based.
///
/// Geometry is not checked beyond presence: an inverted or zero rectangle is
/// a legitimate request for an empty table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableSpec {
    name: String,
    start_row: usize,
    left_col: usize,
    right_col: usize,
    header_rows: usize,
    end_row: Option<usize>,
    max_blank_streak: usize,
    date_row: Option<usize>,
}

impl TableSpec {
    /// Creates a specification with one header row, an inferred end row and a blank streak of 1.
    pub fn new(name: &str, start_row: usize, left_col: usize, right_col: usize) -> Result<Self, SheetBlocksError> {
        Self::try_from(RawTableSpec {
            name: Some(name.to_owned()),
            start_row: Some(start_row),
            left_col: Some(left_col),
            right_col: Some(right_col),
            ..RawTableSpec::default()
        })
    }

    /// Creates a specification from an A1 range such as "B5:F" or "B5:F30".
    /// Without a bottom row the end row is inferred at extraction time.
    pub fn from_range(name: &str, range: &str, header_rows: usize) -> Result<Self, SheetBlocksError> {
        let range = Range::try_from(range)?;
        Self::try_from(RawTableSpec {
            name: Some(name.to_owned()),
            start_row: range.row_lower_bound.map(|row| row + 1),
            left_col: range.col_lower_bound.map(|col| col + 1),
            right_col: range.col_upper_bound.or(range.col_lower_bound).map(|col| col + 1),
            header_rows: Some(header_rows),
            end_row: range.row_upper_bound.map(|row| row + 1),
            ..RawTableSpec::default()
        })
    }

    /// Sets the number of header rows (0 synthesizes `col_N` names).
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Sets an explicit last row, disabling extent inference.
    pub fn with_end_row(mut self, end_row: usize) -> Self {
        self.end_row = Some(end_row);
        self
    }

    /// Sets how many consecutive blank rows end the table during extent inference.
    pub fn with_max_blank_streak(mut self, max_blank_streak: usize) -> Result<Self, SheetBlocksError> {
        if max_blank_streak < 1 {
            Err(SpecError::InvalidBlankStreak(max_blank_streak, self.name.clone()))?
        }
        self.max_blank_streak = max_blank_streak;
        Ok(self)
    }

    /// Sets the row scanned for a date label.
    pub fn with_date_row(mut self, date_row: usize) -> Self {
        self.date_row = Some(date_row);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_row(&self) -> usize {
        self.start_row
    }

    pub fn left_col(&self) -> usize {
        self.left_col
    }

    pub fn right_col(&self) -> usize {
        self.right_col
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn end_row(&self) -> Option<usize> {
        self.end_row
    }

    pub fn max_blank_streak(&self) -> usize {
        self.max_blank_streak
    }

    pub fn date_row(&self) -> Option<usize> {
        self.date_row
    }
}

impl TryFrom<RawTableSpec> for TableSpec {
    type Error = SheetBlocksError;

    fn try_from(raw: RawTableSpec) -> Result<Self, Self::Error> {
        let name = raw.name.ok_or(SpecError::MissingField("name"))?;
        if name.trim().is_empty() {
            Err(SpecError::BlankName)?
        }
        let start_row = raw.start_row.ok_or(SpecError::MissingField("start_row"))?;
        let left_col = raw.left_col.ok_or(SpecError::MissingField("left_col"))?;
        let right_col = raw.right_col.ok_or(SpecError::MissingField("right_col"))?;
        let max_blank_streak = raw.max_blank_streak.unwrap_or(DEFAULT_MAX_BLANK_STREAK);
        if max_blank_streak < 1 {
            Err(SpecError::InvalidBlankStreak(max_blank_streak, name.clone()))?
        }
        Ok(TableSpec {
            name,
            start_row,
            left_col,
            right_col,
            header_rows: raw.header_rows.unwrap_or(DEFAULT_HEADER_ROWS),
            end_row: raw.end_row,
            max_blank_streak,
            date_row: raw.date_row,
        })
    }
}

impl<'de> Deserialize<'de> for TableSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTableSpec::deserialize(deserializer)?;
        TableSpec::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Extraction output for one table specification.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// First row of the block, as requested
    pub start_row: usize,
    /// Last row of the block, explicit or inferred
    pub end_row: usize,
    /// Requested header row count
    pub header_rows: usize,
    /// Number of rows in `rows`
    pub row_count: usize,
    /// Surviving column names in header order
    pub columns: Vec<String>,
    /// Non-empty body rows
    pub rows: Vec<Record>,
    /// Date label found on the specification's date row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
