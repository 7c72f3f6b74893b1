use crate::spreadsheet::grid::Grid;

/// Finds the last row of a table whose end is not given explicitly.
///
/// Scans from `start_row` down, looking only at columns `left_col..=right_col`.
/// A row with any non-empty cell becomes the current last row and resets the
/// blank streak; once `max_blank_streak` consecutive blank rows are seen the
/// scan stops, even if more data follows further down. With no data at all the
/// table is anchored at `start_row`.
pub fn infer_last_row(grid: &Grid, start_row: usize, left_col: usize, right_col: usize, max_blank_streak: usize) -> usize {
    let max_blank_streak = max_blank_streak.max(1);
    let mut last_row = start_row;
    let mut blank_streak = 0;
    for row in start_row.max(1)..=grid.height() {
        if grid.row_has_data(row, left_col, right_col) {
            last_row = row;
            blank_streak = 0;
        } else {
            blank_streak += 1;
            if blank_streak >= max_blank_streak {
                break;
            }
        }
    }
    last_row
}
