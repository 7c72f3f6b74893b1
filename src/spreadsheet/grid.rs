use crate::spreadsheet::cell::CellValue;
use crate::table::range::MergeRange;

static EMPTY: CellValue = CellValue::Empty;

/// A dense, row-major grid of normalized cell values.
///
/// Every row has the same length (the grid's width). Rows and columns are
/// addressed with 1-based indexes; anything outside the grid reads as empty.
/// A grid is read-only once normalization has finished.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    /// Builds a grid from raw rows, padding short rows with empty values.
    pub(crate) fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns true if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the value at the 1-based (row, col) position.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.row(row)
            .and_then(|cells| col.checked_sub(1).and_then(|index| cells.get(index)))
            .unwrap_or(&EMPTY)
    }

    /// Returns the 1-based row, if it exists.
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        row.checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(Vec::as_slice)
    }

    /// Iterates over all rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[CellValue]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns true if any cell of the 1-based row within `left..=right` is non-empty.
    /// Columns past the grid width are never read.
    pub fn row_has_data(&self, row: usize, left: usize, right: usize) -> bool {
        (left.max(1)..=right.min(self.width)).any(|col| !self.get(row, col).is_empty())
    }

    /// Copies the sub-grid bounded by the 1-based inclusive rectangle,
    /// clamped to the grid's extent.
    pub(crate) fn block(&self, top: usize, left: usize, bottom: usize, right: usize) -> Vec<Vec<CellValue>> {
        let bottom = bottom.min(self.height());
        let right = right.min(self.width);
        if top == 0 || left == 0 || top > bottom || left > right {
            return Vec::new();
        }
        self.rows[(top - 1)..bottom]
            .iter()
            .map(|cells| cells[(left - 1)..right].to_vec())
            .collect()
    }

    /// Copies each non-empty merge anchor across its merged rectangle.
    /// Ranges whose anchor is empty are left untouched.
    pub(crate) fn apply_merges(&mut self, merges: &[MergeRange]) {
        for merge in merges {
            let anchor = self.get(merge.min_row, merge.min_col).clone();
            if anchor.is_empty() {
                continue;
            }
            let max_row = merge.max_row.min(self.height());
            let max_col = merge.max_col.min(self.width);
            for row in merge.min_row..=max_row {
                for col in merge.min_col..=max_col {
                    self.rows[row - 1][col - 1] = anchor.clone();
                }
            }
        }
    }

    /// Turns whitespace-only text into empty values.
    pub(crate) fn collapse_blanks(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            if cell.is_blank() {
                *cell = CellValue::Empty;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> CellValue {
        CellValue::from(value)
    }

    #[test]
    fn rows_are_padded() {
        let grid = Grid::from_rows(vec![vec![text("a")], vec![text("b"), text("c"), text("d")]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.rows().all(|row| row.len() == 3));
    }

    #[test]
    fn out_of_range_reads_empty() {
        let grid = Grid::from_rows(vec![vec![text("a")]]);
        assert_eq!(grid.get(1, 1), &text("a"));
        assert_eq!(grid.get(0, 1), &CellValue::Empty);
        assert_eq!(grid.get(1, 0), &CellValue::Empty);
        assert_eq!(grid.get(5, 5), &CellValue::Empty);
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn row_has_data_within_span() {
        let grid = Grid::from_rows(vec![vec![CellValue::Empty, CellValue::Empty, text("x")]]);
        assert!(!grid.row_has_data(1, 1, 2));
        assert!(grid.row_has_data(1, 1, 3));
        assert!(grid.row_has_data(1, 3, 10));
        assert!(grid.row_has_data(1, 1, usize::MAX));
        assert!(!grid.row_has_data(1, 4, usize::MAX));
    }

    #[test]
    fn block_is_clamped() {
        let grid = Grid::from_rows(vec![
            vec![text("a"), text("b")],
            vec![text("c"), text("d")],
        ]);
        assert_eq!(grid.block(2, 2, 9, 9), vec![vec![text("d")]]);
        assert_eq!(grid.block(3, 1, 4, 2), Vec::<Vec<CellValue>>::new());
        assert_eq!(grid.block(2, 1, 1, 2), Vec::<Vec<CellValue>>::new());
    }

    #[test]
    fn merges_copy_anchor() {
        let mut grid = Grid::from_rows(vec![
            vec![text("Region"), CellValue::Empty, CellValue::Empty],
            vec![CellValue::Empty, text("x"), CellValue::Empty],
        ]);
        grid.apply_merges(&[MergeRange::new(1, 1, 1, 3), MergeRange::new(2, 1, 2, 3)]);
        assert_eq!(grid.row(1).unwrap(), &[text("Region"), text("Region"), text("Region")]);
        // empty anchor leaves the range alone
        assert_eq!(grid.row(2).unwrap(), &[CellValue::Empty, text("x"), CellValue::Empty]);
    }

    #[test]
    fn blanks_collapse() {
        let mut grid = Grid::from_rows(vec![vec![text(" "), text(""), text("\u{a0}"), text(" a ")]]);
        grid.collapse_blanks();
        assert_eq!(
            grid.row(1).unwrap(),
            &[CellValue::Empty, CellValue::Empty, CellValue::Empty, text(" a ")]
        );
    }
}
