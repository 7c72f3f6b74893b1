use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::grid::Grid;
use crate::table::column::{flatten_header, synthetic_names};
use crate::table::Record;

/// A 1-based inclusive rectangle within a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Rect {
    /// Returns true for non-positive or inverted rectangles.
    pub fn is_degenerate(&self) -> bool {
        self.top < 1 || self.left < 1 || self.bottom < self.top || self.right < self.left
    }
}

/// Slices a rectangle of the grid into named-field rows.
///
/// The first `header_rows` rows (clamped to the block height) are flattened
/// into column names; without header rows the names are `col_0 ..`. Body rows
/// that are entirely empty are dropped, then columns that are empty in every
/// remaining row. A degenerate rectangle yields no rows.
pub fn slice_block(grid: &Grid, rect: Rect, header_rows: usize, separator: &str, drop_repeated: bool) -> Vec<Record> {
    if rect.is_degenerate() {
        log::warn!("Degenerate rectangle {:?}, nothing to extract", rect);
        return Vec::new();
    }
    let block = grid.block(rect.top, rect.left, rect.bottom, rect.right);
    let width = match block.first() {
        Some(row) => row.len(),
        None => return Vec::new(),
    };

    let header_rows = header_rows.min(block.len());
    let (header, body) = block.split_at(header_rows);
    let names = if header_rows == 0 {
        synthetic_names(width)
    } else {
        flatten_header(header, separator, drop_repeated)
    };

    let body: Vec<&Vec<CellValue>> = body
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();
    let columns: Vec<usize> = (0..width)
        .filter(|col| body.iter().any(|row| !row[*col].is_empty()))
        .collect();

    body.into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| (names[*col].clone(), row[*col].clone()))
                .collect::<Record>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Worksheet;
    use pretty_assertions::assert_eq;

    fn grid(rows: Vec<Vec<Option<&str>>>) -> Grid {
        Worksheet::from_rows("Sheet1", rows).normalize()
    }

    fn rect(top: usize, left: usize, bottom: usize, right: usize) -> Rect {
        Rect { top, left, bottom, right }
    }

    fn record(fields: &[(&str, Option<&str>)]) -> Record {
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), CellValue::from(*value)))
            .collect()
    }

    #[test]
    fn slices_with_single_header() {
        let grid = grid(vec![
            vec![Some("Title"), None, None],
            vec![Some("Region"), Some("Sales"), Some("Notes")],
            vec![Some("North"), Some("10"), None],
            vec![Some("South"), Some("20"), Some("late")],
        ]);
        let rows = slice_block(&grid, rect(2, 1, 4, 3), 1, " | ", true);
        assert_eq!(rows, vec![
            record(&[("Region", Some("North")), ("Sales", Some("10")), ("Notes", None)]),
            record(&[("Region", Some("South")), ("Sales", Some("20")), ("Notes", Some("late"))]),
        ]);
    }

    #[test]
    fn drops_empty_rows_and_columns() {
        let grid = grid(vec![
            vec![Some("A"), Some("B"), Some("C")],
            vec![Some("1"), None, Some("3")],
            vec![None, None, None],
            vec![Some("4"), None, None],
        ]);
        let rows = slice_block(&grid, rect(1, 1, 4, 3), 1, " | ", true);
        assert_eq!(rows, vec![
            record(&[("A", Some("1")), ("C", Some("3"))]),
            record(&[("A", Some("4")), ("C", None)]),
        ]);
    }

    #[test]
    fn all_empty_body_yields_no_rows() {
        let grid = grid(vec![
            vec![Some("A"), Some("B")],
            vec![None, None],
            vec![None, Some(" ")],
        ]);
        assert!(slice_block(&grid, rect(1, 1, 3, 2), 1, " | ", true).is_empty());
    }

    #[test]
    fn synthesizes_names_without_header() {
        let grid = grid(vec![vec![Some("x"), Some("y")]]);
        let rows = slice_block(&grid, rect(1, 1, 1, 2), 0, " | ", true);
        assert_eq!(rows, vec![record(&[("col_0", Some("x")), ("col_1", Some("y"))])]);
    }

    #[test]
    fn header_rows_are_clamped_to_block() {
        let grid = grid(vec![vec![Some("A")], vec![Some("B")]]);
        assert!(slice_block(&grid, rect(1, 1, 2, 1), 5, " | ", true).is_empty());
    }

    #[test]
    fn degenerate_rectangles_are_empty() {
        let grid = grid(vec![vec![Some("A")], vec![Some("B")]]);
        assert!(slice_block(&grid, rect(2, 1, 1, 1), 1, " | ", true).is_empty());
        assert!(slice_block(&grid, rect(0, 1, 2, 1), 1, " | ", true).is_empty());
        assert!(slice_block(&grid, rect(1, 2, 2, 1), 1, " | ", true).is_empty());
    }

    #[test]
    fn rectangle_beyond_grid_is_clamped() {
        let grid = grid(vec![vec![Some("A")], vec![Some("1")]]);
        let rows = slice_block(&grid, rect(1, 1, 50, 10), 1, " | ", true);
        assert_eq!(rows, vec![record(&[("A", Some("1"))])]);
    }

    #[test]
    fn declared_header_with_empty_body_is_dropped() {
        let grid = grid(vec![
            vec![Some("Region"), Some("Comment")],
            vec![Some("North"), None],
        ]);
        let rows = slice_block(&grid, rect(1, 1, 2, 2), 1, " | ", true);
        assert_eq!(rows, vec![record(&[("Region", Some("North"))])]);
    }
}
