//! Cumulative-offset model of a table's column widths and row heights.
//!
//! Offsets are computed eagerly whenever a size changes, so every query is
//! O(1) and never observes a stale sum.

use super::search::{search_before_edge, search_leading_edge};
use super::Rect;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f64 = 150.0;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// Column widths and row heights with their running totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    col_widths: Vec<f64>,
    row_heights: Vec<f64>,
    /// `col_positions[i]` = x of column i's left edge; one extra entry for the final edge
    col_positions: Vec<f64>,
    /// `row_positions[i]` = y of row i's top edge; one extra entry for the final edge
    row_positions: Vec<f64>,
}

impl Grid {
    /// Build a grid from explicit sizes.
    ///
    /// Negative or non-finite sizes are treated as zero (a hidden row or column).
    pub fn new(row_heights: Vec<f64>, col_widths: Vec<f64>) -> Self {
        let row_heights: Vec<f64> = row_heights.into_iter().map(sanitize_size).collect();
        let col_widths: Vec<f64> = col_widths.into_iter().map(sanitize_size).collect();
        let row_positions = prefix_sums(&row_heights);
        let col_positions = prefix_sums(&col_widths);
        Self {
            col_widths,
            row_heights,
            col_positions,
            row_positions,
        }
    }

    /// A grid of `num_rows` x `num_cols` default-sized cells.
    pub fn uniform(num_rows: u32, num_cols: u32) -> Self {
        Self::new(
            vec![DEFAULT_ROW_HEIGHT; num_rows as usize],
            vec![DEFAULT_COL_WIDTH; num_cols as usize],
        )
    }

    pub fn num_cols(&self) -> u32 {
        u32::try_from(self.col_widths.len()).unwrap_or(u32::MAX)
    }

    pub fn num_rows(&self) -> u32 {
        u32::try_from(self.row_heights.len()).unwrap_or(u32::MAX)
    }

    pub fn col_widths(&self) -> &[f64] {
        &self.col_widths
    }

    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Width of column `col`, or 0 when out of range.
    pub fn col_width(&self, col: u32) -> f64 {
        self.col_widths.get(col as usize).copied().unwrap_or(0.0)
    }

    /// Height of row `row`, or 0 when out of range.
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights.get(row as usize).copied().unwrap_or(0.0)
    }

    /// Sum of the widths of all columns before `col` (its left edge).
    ///
    /// Indices past the last column clamp to the total width.
    pub fn cumulative_width_before(&self, col: u32) -> f64 {
        clamped_edge(&self.col_positions, col as usize)
    }

    /// Sum of the widths of all columns up to and including `col` (its right edge).
    pub fn cumulative_width_at(&self, col: u32) -> f64 {
        clamped_edge(&self.col_positions, (col as usize).saturating_add(1))
    }

    /// Sum of the heights of all rows before `row` (its top edge).
    pub fn cumulative_height_before(&self, row: u32) -> f64 {
        clamped_edge(&self.row_positions, row as usize)
    }

    /// Sum of the heights of all rows up to and including `row` (its bottom edge).
    pub fn cumulative_height_at(&self, row: u32) -> f64 {
        clamped_edge(&self.row_positions, (row as usize).saturating_add(1))
    }

    /// Total width of all columns
    pub fn width(&self) -> f64 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }

    /// Total height of all rows
    pub fn height(&self) -> f64 {
        self.row_positions.last().copied().unwrap_or(0.0)
    }

    /// Resize one column. Out-of-range indices are ignored.
    pub fn set_column_width(&mut self, col: u32, width: f64) {
        let col = col as usize;
        let Some(slot) = self.col_widths.get_mut(col) else {
            return;
        };
        *slot = sanitize_size(width);
        refresh_positions_from(&mut self.col_positions, &self.col_widths, col);
    }

    /// Resize one row. Out-of-range indices are ignored.
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        let row = row as usize;
        let Some(slot) = self.row_heights.get_mut(row) else {
            return;
        };
        *slot = sanitize_size(height);
        refresh_positions_from(&mut self.row_positions, &self.row_heights, row);
    }

    /// Bounds of the whole grid, origin at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }

    /// Bounds of a single cell in grid coordinates.
    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        Rect::new(
            self.cumulative_width_before(col),
            self.cumulative_height_before(row),
            self.col_width(col),
            self.row_height(row),
        )
    }

    /// Bounds of a full-height column strip.
    pub fn column_rect(&self, col: u32) -> Rect {
        Rect::new(
            self.cumulative_width_before(col),
            0.0,
            self.col_width(col),
            self.height(),
        )
    }

    /// Bounds of a full-width row strip.
    pub fn row_rect(&self, row: u32) -> Rect {
        Rect::new(
            0.0,
            self.cumulative_height_before(row),
            self.width(),
            self.row_height(row),
        )
    }

    /// Bounds covering the cells from `start` to `end` inclusive, each `(row, col)`.
    pub fn region_rect(&self, start: (u32, u32), end: (u32, u32)) -> Rect {
        self.cell_rect(start.0, start.1).union(&self.cell_rect(end.0, end.1))
    }

    /// Column index whose span contains grid-space `x`, clamped to the grid.
    pub fn col_at_x(&self, x: f64) -> Option<u32> {
        let max = self.num_cols().checked_sub(1)?;
        Some(search_leading_edge(x, max, |i| self.cumulative_width_before(i)))
    }

    /// Row index whose span contains grid-space `y`, clamped to the grid.
    pub fn row_at_y(&self, y: f64) -> Option<u32> {
        let max = self.num_rows().checked_sub(1)?;
        Some(search_leading_edge(y, max, |i| self.cumulative_height_before(i)))
    }

    /// Inclusive range of columns intersecting `rect`'s horizontal extent.
    ///
    /// `rect` is in grid coordinates (e.g. a viewport rect). Returns `None`
    /// for an empty grid.
    pub fn column_indices_in_rect(&self, rect: &Rect) -> Option<(u32, u32)> {
        let max = self.num_cols().checked_sub(1)?;
        let start = search_leading_edge(rect.left, max, |i| self.cumulative_width_before(i));
        let end = search_before_edge(rect.right(), max, |i| self.cumulative_width_before(i));
        Some((start, end.max(start)))
    }

    /// Inclusive range of rows intersecting `rect`'s vertical extent.
    pub fn row_indices_in_rect(&self, rect: &Rect) -> Option<(u32, u32)> {
        let max = self.num_rows().checked_sub(1)?;
        let start = search_leading_edge(rect.top, max, |i| self.cumulative_height_before(i));
        let end = search_before_edge(rect.bottom(), max, |i| self.cumulative_height_before(i));
        Some((start, end.max(start)))
    }
}

fn sanitize_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

fn prefix_sums(sizes: &[f64]) -> Vec<f64> {
    let mut positions = Vec::with_capacity(sizes.len() + 1);
    let mut acc = 0.0;
    for size in sizes {
        positions.push(acc);
        acc += size;
    }
    positions.push(acc); // Final edge
    positions
}

/// Recompute `positions[from + 1..]` after `sizes[from]` changed.
fn refresh_positions_from(positions: &mut [f64], sizes: &[f64], from: usize) {
    let mut acc = positions.get(from).copied().unwrap_or(0.0);
    for (pos, size) in positions
        .iter_mut()
        .skip(from + 1)
        .zip(sizes.iter().skip(from))
    {
        acc += size;
        *pos = acc;
    }
}

fn clamped_edge(positions: &[f64], index: usize) -> f64 {
    positions
        .get(index)
        .or_else(|| positions.last())
        .copied()
        .unwrap_or(0.0)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::new(vec![5.0, 15.0], vec![10.0, 20.0, 30.0])
    }

    #[test]
    fn test_counts_and_totals() {
        let grid = sample();
        assert_eq!(grid.num_cols(), 3);
        assert_eq!(grid.num_rows(), 2);
        assert_eq!(grid.width(), 60.0);
        assert_eq!(grid.height(), 20.0);
    }

    #[test]
    fn test_cumulative_edges() {
        let grid = sample();
        assert_eq!(grid.cumulative_width_before(0), 0.0);
        assert_eq!(grid.cumulative_width_before(1), 10.0);
        assert_eq!(grid.cumulative_width_before(2), 30.0);
        assert_eq!(grid.cumulative_width_at(0), 10.0);
        assert_eq!(grid.cumulative_width_at(2), 60.0);
        assert_eq!(grid.cumulative_height_before(1), 5.0);
        assert_eq!(grid.cumulative_height_at(1), 20.0);
    }

    #[test]
    fn test_out_of_range_clamps_to_total() {
        let grid = sample();
        assert_eq!(grid.cumulative_width_before(99), 60.0);
        assert_eq!(grid.cumulative_width_at(99), 60.0);
        assert_eq!(grid.cumulative_height_before(u32::MAX), 20.0);
        assert_eq!(grid.col_width(7), 0.0);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::default();
        assert_eq!(grid.num_cols(), 0);
        assert_eq!(grid.width(), 0.0);
        assert_eq!(grid.cumulative_width_before(3), 0.0);
        assert_eq!(grid.col_at_x(5.0), None);
        assert_eq!(grid.row_indices_in_rect(&Rect::new(0.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_bad_sizes_become_zero() {
        let grid = Grid::new(vec![f64::NAN, -4.0], vec![f64::INFINITY, 10.0]);
        assert_eq!(grid.height(), 0.0);
        assert_eq!(grid.width(), 10.0);
    }

    #[test]
    fn test_resize_refreshes_following_edges() {
        let mut grid = sample();
        grid.set_column_width(1, 5.0);
        assert_eq!(grid.cumulative_width_before(1), 10.0);
        assert_eq!(grid.cumulative_width_before(2), 15.0);
        assert_eq!(grid.width(), 45.0);

        grid.set_row_height(0, 10.0);
        assert_eq!(grid.cumulative_height_before(1), 10.0);
        assert_eq!(grid.height(), 25.0);
    }

    #[test]
    fn test_resize_out_of_range_is_ignored() {
        let mut grid = sample();
        grid.set_column_width(3, 100.0);
        grid.set_row_height(9, 100.0);
        assert_eq!(grid, sample());
    }

    #[test]
    fn test_cell_and_strip_rects() {
        let grid = sample();
        assert_eq!(grid.cell_rect(1, 2), Rect::new(30.0, 5.0, 30.0, 15.0));
        assert_eq!(grid.column_rect(1), Rect::new(10.0, 0.0, 20.0, 20.0));
        assert_eq!(grid.row_rect(1), Rect::new(0.0, 5.0, 60.0, 15.0));
        assert_eq!(grid.region_rect((0, 0), (1, 1)), Rect::new(0.0, 0.0, 30.0, 20.0));
        assert_eq!(grid.rect(), Rect::new(0.0, 0.0, 60.0, 20.0));
    }

    #[test]
    fn test_indices_in_rect() {
        let grid = sample();
        // Viewport from x=12 to x=42 spans columns 1 and 2
        let viewport = Rect::new(12.0, 0.0, 30.0, 4.0);
        assert_eq!(grid.column_indices_in_rect(&viewport), Some((1, 2)));
        assert_eq!(grid.row_indices_in_rect(&viewport), Some((0, 0)));

        // Right edge exactly on a column boundary does not include the next column
        let aligned = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(grid.column_indices_in_rect(&aligned), Some((0, 0)));
        assert_eq!(grid.row_indices_in_rect(&aligned), Some((0, 1)));
    }

    #[test]
    fn test_indices_in_fractional_rect() {
        let grid = Grid::new(vec![10.0, 10.0], vec![10.0, 10.0]);
        // Right edge at 10.5 reaches half a pixel into column 1
        let straddle = Rect::new(9.5, 0.0, 1.0, 5.0);
        assert!(straddle.contains_x(10.2));
        assert_eq!(grid.col_at_x(10.2), Some(1));
        assert_eq!(grid.column_indices_in_rect(&straddle), Some((0, 1)));
        assert_eq!(
            grid.column_indices_in_rect(&Rect::new(0.5, 0.0, 10.0, 5.0)),
            Some((0, 1))
        );
        assert_eq!(
            grid.row_indices_in_rect(&Rect::new(0.0, 9.75, 1.0, 0.5)),
            Some((0, 1))
        );
    }

    #[test]
    fn test_max_index_edges_clamp_to_total() {
        let grid = sample();
        assert_eq!(grid.cumulative_width_at(u32::MAX), 60.0);
        assert_eq!(grid.cumulative_height_at(u32::MAX), 20.0);
    }
}
