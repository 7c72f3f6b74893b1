use crate::error::SheetBlocksError;
use crate::spreadsheet::reference::{col_to_index, index_to_reference, row_to_index};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;

static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern"));

/// Errors related to Excel-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),

    #[error("Incomplete merge range '{0}'")]
    IncompleteMergeRange(String),

    #[error("Inverted merge range '{0}'")]
    InvertedMergeRange(String),
}

/// Represents an Excel-style cell range with optional boundaries.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Range {
    /// Lower row bound (0-based index), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Upper row bound (0-based index), None for unbounded
    pub row_upper_bound: Option<usize>,
    /// Lower column bound (0-based index), None for unbounded
    pub col_lower_bound: Option<usize>,
    /// Upper column bound (0-based index), None for unbounded
    pub col_upper_bound: Option<usize>,
}

impl TryFrom<&str> for Range {
    type Error = SheetBlocksError;

    /// Parses an Excel-style range string (e.g., "A1", "B2:C5", "A", "1:10").
    /// Supports single cells, ranges, and partial ranges (columns or rows only).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim().to_ascii_uppercase();
        let captures = RANGE_PATTERN
            .captures(value.as_str())
            .ok_or(RangeError::FormatError(value.to_owned()))?;
        let bound = |index: usize, parse: fn(&str) -> Option<usize>| {
            captures.get(index).map(|matcher| matcher.as_str()).and_then(parse)
        };
        let range = Range {
            col_lower_bound: bound(1, col_to_index),
            row_lower_bound: bound(2, row_to_index),
            col_upper_bound: bound(4, col_to_index),
            row_upper_bound: bound(5, row_to_index),
        };
        if range == Range::default() {
            Err(RangeError::FormatError(value.clone()))?
        }
        Ok(range)
    }
}

/// A rectangular merged region sharing the value of its top-left anchor cell.
/// All bounds are 1-based and inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl MergeRange {
    /// Creates a merge range, swapping bounds so that min <= max.
    pub fn new(min_row: usize, min_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            min_row: min_row.min(max_row),
            min_col: min_col.min(max_col),
            max_row: min_row.max(max_row),
            max_col: min_col.max(max_col),
        }
    }

    /// Returns true if the 1-based (row, col) position lies inside the range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.min_row <= row && row <= self.max_row && self.min_col <= col && col <= self.max_col
    }
}

impl TryFrom<&str> for MergeRange {
    type Error = SheetBlocksError;

    /// Parses a fully bounded range such as "A1:C2". A single cell ("B4") is a 1x1 merge.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let range = Range::try_from(value)?;
        let incomplete = || RangeError::IncompleteMergeRange(value.to_owned());
        let min_row = range.row_lower_bound.ok_or_else(incomplete)?;
        let min_col = range.col_lower_bound.ok_or_else(incomplete)?;
        let max_row = range.row_upper_bound.or(range.col_upper_bound.map(|_| min_row));
        let max_col = range.col_upper_bound.or(range.row_upper_bound.map(|_| min_col));
        let (max_row, max_col) = match (max_row, max_col) {
            (Some(max_row), Some(max_col)) => (max_row, max_col),
            (None, None) => (min_row, min_col),
            _ => Err(incomplete())?,
        };
        if max_row < min_row || max_col < min_col {
            Err(RangeError::InvertedMergeRange(value.to_owned()))?
        }
        Ok(MergeRange {
            min_row: min_row + 1,
            min_col: min_col + 1,
            max_row: max_row + 1,
            max_col: max_col + 1,
        })
    }
}

impl Display for MergeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            index_to_reference(self.min_row.saturating_sub(1), self.min_col.saturating_sub(1)),
            index_to_reference(self.max_row.saturating_sub(1), self.max_col.saturating_sub(1))
        )
    }
}
