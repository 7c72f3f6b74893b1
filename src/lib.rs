//! # Sheet Blocks
//!
//! Extracts logically-structured tables from visually formatted spreadsheet
//! worksheets: merged cells, multi-row headers and tables whose last row is
//! not marked explicitly.
//!
//! ## Features
//!
//! - **Merge flattening**: merged regions take their anchor value, whitespace-only text is empty
//! - **Header flattening**: multi-row headers become unique names like `2025 | Q1`
//! - **Extent inference**: a table ends after a configurable run of blank rows
//! - **Block slicing**: ordered records, with fully empty rows and columns dropped
//! - **Date labels**: best-effort date extraction from a label row
//!
//! The engine is synchronous and pure: a normalized [`Grid`] is read-only and
//! may be shared across threads while tables are extracted from it.
//!
//! ## Example
//!
//! ```
//! use sheet_blocks::{extract, ExtractOptions, TableSpec, Worksheet};
//!
//! let sheet = Worksheet::from_rows("Sheet1", vec![
//!     vec![Some("Region"), Some("Sales")],
//!     vec![Some("North"), Some("10")],
//!     vec![None, None],
//! ]);
//! let specs = vec![TableSpec::new("sales", 1, 1, 2).unwrap()];
//! let tables = extract(&sheet.normalize(), &specs, &ExtractOptions::default()).unwrap();
//! assert_eq!(tables["sales"].row_count, 1);
//! ```
mod error;
mod helpers;

pub mod extract;
pub mod spreadsheet;
pub mod table;

pub use crate::error::SheetBlocksError;
pub use crate::extract::{extract, extract_date, extract_table, infer_last_row, slice_block, ExtractError, ExtractOptions, Rect};
pub use crate::spreadsheet::{Cell, CellValue, Grid, Worksheet};
pub use crate::table::column::flatten_header;
pub use crate::table::range::{MergeRange, Range};
pub use crate::table::{ExtractionResult, RawTableSpec, Record, SpecError, TableSpec};

use crate::error::ResultMessage;
use anyhow::{Context, Result};
use indexmap::IndexMap;

/// Validates raw table specifications, normalizes the worksheet and extracts every table.
///
/// # Arguments
///
/// * `worksheet` - The decoded worksheet
/// * `specs` - Caller-supplied table specifications, validated before any grid work
/// * `options` - Header, date and formatting options
///
/// # Errors
///
/// Returns an error if a specification is missing a required field or is
/// otherwise invalid, or if two specifications share a name.
pub fn extract_worksheet(
    worksheet: &Worksheet,
    specs: Vec<RawTableSpec>,
    options: &ExtractOptions,
) -> Result<IndexMap<String, ExtractionResult>> {
    let specs = specs
        .into_iter()
        .enumerate()
        .map(|(index, raw)| TableSpec::try_from(raw).with_prefix(&format!("Invalid table specification #{}", index)))
        .collect::<Result<Vec<_>, SheetBlocksError>>()?;
    let grid = worksheet.normalize();
    extract(&grid, &specs, options)
        .with_context(|| format!("Failed to extract tables from sheet '{}'", worksheet.name))
}
