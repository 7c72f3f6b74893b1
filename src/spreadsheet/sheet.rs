use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::grid::Grid;
use crate::table::range::MergeRange;

/// A single decoded cell at a 1-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row number (1-based)
    pub row: usize,
    /// Column number (1-based)
    pub col: usize,
    /// Decoded value
    pub value: CellValue,
}

/// A decoded worksheet: sparse cell values plus merge-range metadata.
///
/// This is the engine's input. It is produced by whatever reads the workbook
/// and is turned into a dense [`Grid`] by [`Worksheet::normalize`].
#[derive(Clone, Debug, Default)]
pub struct Worksheet {
    /// Sheet name
    pub name: String,
    /// All cells in insertion order; later cells win on the same position
    cells: Vec<Cell>,
    /// Merged regions
    merges: Vec<MergeRange>,
    /// Worksheet extent, covering every populated cell
    max_row: usize,
    max_col: usize,
}

impl Worksheet {
    /// Creates an empty worksheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Creates a worksheet from dense rows, row 1 first.
    pub fn from_rows<T>(name: &str, rows: Vec<Vec<T>>) -> Self
    where
        T: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                sheet.set(row + 1, col + 1, value);
            }
        }
        sheet
    }

    /// Sets the value at a 1-based position. Position 0 does not exist and is ignored.
    pub fn set<T>(&mut self, row: usize, col: usize, value: T)
    where
        T: Into<CellValue>,
    {
        self.push(Cell { row, col, value: value.into() });
    }

    /// Adds a decoded cell, updating the worksheet extent.
    pub fn push(&mut self, cell: Cell) {
        if cell.row == 0 || cell.col == 0 {
            log::debug!("Ignoring cell at non-existent position ({}, {})", cell.row, cell.col);
            return;
        }
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    /// Registers a merged region. Merges do not grow the worksheet extent;
    /// the part of a range outside the populated cells is dropped on normalization.
    pub fn add_merge(&mut self, merge: MergeRange) {
        if merge.min_row == 0 || merge.min_col == 0 {
            log::debug!("Ignoring merge range with non-existent anchor {:?}", merge);
            return;
        }
        self.merges.push(merge);
    }

    /// Merged regions in registration order.
    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    /// Worksheet extent as (rows, columns): the bottom-right populated cell.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.max_row, self.max_col)
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    /// Flattens merge ranges and converts the worksheet into a dense grid.
    ///
    /// Non-empty merge anchors are copied across their rectangle first, clipped
    /// to the worksheet extent; then whitespace-only text is collapsed to empty.
    /// An empty worksheet yields a zero-row grid.
    pub fn normalize(&self) -> Grid {
        for merge in &self.merges {
            if merge.max_row > self.max_row || merge.max_col > self.max_col {
                log::debug!(
                    "Clipping merge range {} to the {}x{} extent of sheet '{}'",
                    merge,
                    self.max_row,
                    self.max_col,
                    self.name
                );
            }
        }
        let mut rows = vec![vec![CellValue::Empty; self.max_col]; self.max_row];
        for cell in &self.cells {
            rows[cell.row - 1][cell.col - 1] = cell.value.clone();
        }
        let mut grid = Grid::from_rows(rows);
        grid.apply_merges(&self.merges);
        grid.collapse_blanks();
        log::debug!(
            "Normalized sheet '{}' to {}x{} grid with {} merge range(s)",
            self.name,
            grid.height(),
            grid.width(),
            self.merges.len()
        );
        grid
    }
}
