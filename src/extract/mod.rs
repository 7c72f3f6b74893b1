//! # Extraction Engine
//!
//! Turns a normalized [`Grid`] and a list of [`TableSpec`]s into one
//! [`ExtractionResult`] per table. Every table is resolved independently:
//! the end row comes from the specification or from extent inference, the
//! block is sliced into records, and an optional date label is attached.
use crate::error::SheetBlocksError;
use crate::spreadsheet::grid::Grid;
use crate::table::{ExtractionResult, TableSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub mod date;
pub mod extent;
pub mod slicer;

pub use date::extract_date;
pub use extent::infer_last_row;
pub use slicer::{slice_block, Rect};

/// Errors raised by the orchestrator before any table is extracted.
#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("Duplicate table name '{0}'")]
    DuplicateTableName(String),
}

/// Engine configuration shared by all tables of one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Joins the parts of a multi-row header
    pub header_separator: String,
    /// Skips a header part equal to the one above it in the same column
    pub drop_repeated_headers: bool,
    /// Accepted date formats (chrono `strftime` syntax); the first one renders results
    pub date_formats: Vec<String>,
    /// Disables the free-text date token search
    pub strict_dates: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            header_separator: " | ".to_owned(),
            drop_repeated_headers: true,
            date_formats: ["%d-%b-%y", "%d-%b-%Y", "%Y-%m-%d", "%d/%m/%Y"]
                .iter()
                .map(|format| format.to_string())
                .collect(),
            strict_dates: false,
        }
    }
}

/// Extracts every table of `specs` from the grid, keyed by table name in specification order.
///
/// Duplicate names are rejected before any extraction happens.
pub fn extract(grid: &Grid, specs: &[TableSpec], options: &ExtractOptions) -> Result<IndexMap<String, ExtractionResult>, SheetBlocksError> {
    let mut names = HashSet::new();
    for spec in specs {
        if !names.insert(spec.name()) {
            Err(ExtractError::DuplicateTableName(spec.name().to_owned()))?
        }
    }
    Ok(specs
        .iter()
        .map(|spec| (spec.name().to_owned(), extract_table(grid, spec, options)))
        .collect())
}

/// Extracts a single table.
pub fn extract_table(grid: &Grid, spec: &TableSpec, options: &ExtractOptions) -> ExtractionResult {
    let end_row = spec.end_row().unwrap_or_else(|| {
        infer_last_row(grid, spec.start_row(), spec.left_col(), spec.right_col(), spec.max_blank_streak())
    });
    let rect = Rect {
        top: spec.start_row(),
        left: spec.left_col(),
        bottom: end_row,
        right: spec.right_col(),
    };
    let rows = slice_block(
        grid,
        rect,
        spec.header_rows(),
        &options.header_separator,
        options.drop_repeated_headers,
    );
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    let date = spec.date_row().and_then(|row| {
        let date = extract_date(grid, row, &options.date_formats, options.strict_dates);
        if date.is_none() {
            log::warn!("No date found on row {} for table '{}'", row, spec.name());
        }
        date
    });

    log::debug!(
        "Extracted table '{}' rows {}..={} with {} row(s) and {} column(s)",
        spec.name(),
        spec.start_row(),
        end_row,
        rows.len(),
        columns.len()
    );

    ExtractionResult {
        start_row: spec.start_row(),
        end_row,
        header_rows: spec.header_rows(),
        row_count: rows.len(),
        columns,
        rows,
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::{CellValue, Worksheet};
    use crate::table::range::MergeRange;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    /// Title on row 1, three header rows at 2..=4 with merged group labels,
    /// data rows 5..=25 with a gap at 15, two blank rows, then a footer at 28.
    fn report() -> Worksheet {
        let mut sheet = Worksheet::new("Report");
        sheet.set(1, 1, "Sales report as of 22-Jan-26");
        sheet.set(2, 1, "Region");
        sheet.set(2, 2, "2025");
        sheet.set(2, 4, "2026");
        sheet.add_merge(MergeRange::new(2, 1, 4, 1));
        sheet.add_merge(MergeRange::new(2, 2, 2, 3));
        sheet.add_merge(MergeRange::new(2, 4, 2, 5));
        sheet.set(3, 2, "H1");
        sheet.set(3, 4, "H1");
        sheet.set(4, 2, "Jan");
        sheet.set(4, 3, "Feb");
        sheet.set(4, 4, "Jan");
        sheet.set(4, 5, "Feb");
        for row in (5..=25).filter(|row| *row != 15) {
            sheet.set(row, 1, format!("Region {}", row));
            for col in 2..=5 {
                sheet.set(row, col, (row * col) as f64);
            }
        }
        sheet.set(28, 1, "Total");
        sheet
    }

    #[test]
    fn end_to_end_report() {
        let grid = report().normalize();
        let spec = TableSpec::new("sales", 2, 1, 5)
            .unwrap()
            .with_header_rows(3)
            .with_max_blank_streak(2)
            .unwrap()
            .with_date_row(1);
        let tables = extract(&grid, &[spec], &ExtractOptions::default()).unwrap();
        let table = &tables["sales"];

        assert_eq!(table.start_row, 2);
        assert_eq!(table.end_row, 25);
        assert_eq!(table.header_rows, 3);
        assert_eq!(table.row_count, 20);
        assert_eq!(table.rows.len(), 20);
        assert_eq!(table.columns, vec![
            "Region",
            "2025 | H1 | Jan",
            "2025 | H1 | Feb",
            "2026 | H1 | Jan",
            "2026 | H1 | Feb",
        ]);
        assert_eq!(table.rows[0]["Region"], CellValue::from("Region 5"));
        assert_eq!(table.rows[0]["2026 | H1 | Feb"], CellValue::Number(25.0));
        assert_eq!(table.rows[10]["Region"], CellValue::from("Region 16"));
        assert_eq!(table.date.as_deref(), Some("22-Jan-26"));
    }

    #[test]
    fn streak_of_one_stops_at_gap() {
        let grid = report().normalize();
        let spec = TableSpec::new("sales", 2, 1, 5).unwrap().with_header_rows(3);
        let table = extract_table(&grid, &spec, &ExtractOptions::default());
        assert_eq!(table.end_row, 14);
        assert_eq!(table.row_count, 10);
    }

    #[test]
    fn explicit_end_row_skips_inference() {
        let grid = report().normalize();
        let spec = TableSpec::new("footer", 26, 1, 1)
            .unwrap()
            .with_header_rows(0)
            .with_end_row(28);
        let table = extract_table(&grid, &spec, &ExtractOptions::default());
        assert_eq!(table.end_row, 28);
        assert_eq!(table.columns, vec!["col_0"]);
        assert_eq!(table.rows[0]["col_0"], CellValue::from("Total"));
    }

    #[test]
    fn degenerate_spec_is_empty_not_an_error() {
        let grid = report().normalize();
        let specs = vec![
            TableSpec::new("inverted", 10, 1, 5).unwrap().with_end_row(3),
            TableSpec::new("sales", 2, 1, 5).unwrap().with_header_rows(3),
        ];
        let tables = extract(&grid, &specs, &ExtractOptions::default()).unwrap();
        assert_eq!(tables["inverted"].row_count, 0);
        assert!(tables["inverted"].columns.is_empty());
        assert_eq!(tables["sales"].row_count, 10);
        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["inverted", "sales"]);
    }

    #[test]
    fn no_data_anchors_at_start_row() {
        let grid = report().normalize();
        let spec = TableSpec::new("nothing", 26, 2, 5).unwrap();
        let table = extract_table(&grid, &spec, &ExtractOptions::default());
        assert_eq!(table.end_row, 26);
        assert_eq!(table.row_count, 0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let grid = report().normalize();
        let specs = vec![
            TableSpec::new("sales", 2, 1, 5).unwrap(),
            TableSpec::new("sales", 5, 1, 5).unwrap(),
        ];
        let error = extract(&grid, &specs, &ExtractOptions::default()).unwrap_err();
        assert_eq!(error.to_string(), "Duplicate table name 'sales'");
    }

    #[test]
    fn missing_date_is_absent() {
        let grid = report().normalize();
        let spec = TableSpec::new("sales", 2, 1, 5).unwrap().with_date_row(3);
        let options = ExtractOptions {
            strict_dates: true,
            ..ExtractOptions::default()
        };
        assert_eq!(extract_table(&grid, &spec, &options).date, None);
    }

    #[test]
    fn typed_date_cells_survive_into_records() {
        let mut sheet = Worksheet::new("Dates");
        sheet.set(1, 1, "When");
        sheet.set(2, 1, NaiveDate::from_ymd_opt(2026, 1, 22).unwrap());
        let table = extract_table(&sheet.normalize(), &TableSpec::new("dates", 1, 1, 1).unwrap(), &ExtractOptions::default());
        let json = serde_json::to_string(&table.rows).unwrap();
        assert_eq!(json, r#"[{"When":"2026-01-22"}]"#);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ExtractOptions = serde_json::from_str(r#"{"header_separator": "_"}"#).unwrap();
        assert_eq!(options.header_separator, "_");
        assert!(options.drop_repeated_headers);
        assert_eq!(options.date_formats[0], "%d-%b-%y");
    }
}
