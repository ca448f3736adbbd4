//! Client-space to cell-index resolution.
//!
//! The [`Locator`] reads live geometry from a [`TableSurface`] (the table root
//! and its scrollable body) and maps pointer coordinates onto the current
//! [`Grid`] by binary search over cumulative offsets.

mod surface;

use serde::{Deserialize, Serialize};

use crate::layout::search::search_leading_edge;
use crate::layout::{Grid, Rect};

pub use surface::StaticSurface;

/// Horizontal padding added on each side of measured cell text, in pixels.
pub const CELL_HORIZONTAL_PADDING: f64 = 10.0;

/// Scroll position and visible size of the table body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
}

/// Live geometry of a rendered table.
pub trait TableSurface {
    /// Bounding box of the table root in client space
    fn table_bounds(&self) -> Rect;
    /// Bounding box of the scrollable body in client space
    fn body_bounds(&self) -> Rect;
    fn body_scroll(&self) -> ScrollState;
    /// Text widths of every rendered cell in `column`, plus every rendered
    /// column header cell.
    fn measure_cells(&self, column: u32) -> Vec<f64>;
}

/// Logical cell position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

/// Tunables for [`Locator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    pub cell_horizontal_padding: f64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            cell_horizontal_padding: CELL_HORIZONTAL_PADDING,
        }
    }
}

/// Maps client coordinates to rows and columns of a table.
#[derive(Debug)]
pub struct Locator<S> {
    surface: S,
    grid: Grid,
    config: LocatorConfig,
}

impl<S: TableSurface> Locator<S> {
    pub fn new(surface: S, grid: Grid) -> Self {
        Self::with_config(surface, grid, LocatorConfig::default())
    }

    pub fn with_config(surface: S, grid: Grid, config: LocatorConfig) -> Self {
        Self {
            surface,
            grid,
            config,
        }
    }

    /// Replace the grid after a resize or structural change.
    pub fn set_grid(&mut self, grid: Grid) {
        tracing::trace!(
            rows = grid.num_rows(),
            cols = grid.num_cols(),
            "locator grid replaced"
        );
        self.grid = grid;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The visible scroll window in body-local coordinates.
    pub fn viewport_rect(&self) -> Rect {
        let scroll = self.surface.body_scroll();
        Rect::new(
            scroll.scroll_left,
            scroll.scroll_top,
            scroll.client_width,
            scroll.client_height,
        )
    }

    /// Width needed to fit the widest rendered cell of `column`, header cells
    /// included. Only rendered cells are measured, so with virtualization this
    /// is the widest *visible* cell. Returns 0 when nothing is rendered.
    pub fn widest_visible_cell_in_column(&self, column: u32) -> u32 {
        let padding = self.config.cell_horizontal_padding;
        self.surface
            .measure_cells(column)
            .into_iter()
            .filter(|w| w.is_finite())
            .map(|w| padded_cell_width(w, padding))
            .max()
            .unwrap_or(0)
    }

    /// Column under `client_x`, or `None` outside the table's horizontal extent.
    pub fn convert_point_to_column(&self, client_x: f64) -> Option<u32> {
        if !self.table_rect().contains_x(client_x) {
            tracing::trace!(client_x, "point outside table columns");
            return None;
        }
        let max = self.grid.num_cols().checked_sub(1)?;
        Some(self.search_column(client_x, max))
    }

    /// Row under `client_y`, or `None` outside the table's vertical extent.
    pub fn convert_point_to_row(&self, client_y: f64) -> Option<u32> {
        if !self.table_rect().contains_y(client_y) {
            tracing::trace!(client_y, "point outside table rows");
            return None;
        }
        let max = self.grid.num_rows().checked_sub(1)?;
        Some(self.search_row(client_y, max))
    }

    /// Cell under `(client_x, client_y)`, clamped to the grid.
    ///
    /// Unlike the single-axis conversions there is no bounds check against
    /// the table rect; callers validate the point first or accept clamping.
    pub fn convert_point_to_cell(&self, client_x: f64, client_y: f64) -> CellCoord {
        CellCoord {
            col: self.search_column(client_x, self.grid.num_cols().saturating_sub(1)),
            row: self.search_row(client_y, self.grid.num_rows().saturating_sub(1)),
        }
    }

    /// Client-space x of column `index`'s left edge.
    pub fn convert_cell_index_to_client_x(&self, index: u32) -> f64 {
        self.body_rect().left + self.grid.cumulative_width_before(index)
    }

    /// Client-space y of row `index`'s top edge.
    pub fn convert_cell_index_to_client_y(&self, index: u32) -> f64 {
        self.body_rect().top + self.grid.cumulative_height_before(index)
    }

    pub fn table_rect(&self) -> Rect {
        self.surface.table_bounds()
    }

    /// The body's bounding box with its scroll offset removed.
    ///
    /// `body_rect().left + grid.cumulative_width_before(i)` is the client x of
    /// column `i` whatever the current scroll position.
    pub fn body_rect(&self) -> Rect {
        let scroll = self.surface.body_scroll();
        self.surface
            .body_bounds()
            .translate(-scroll.scroll_left, -scroll.scroll_top)
    }

    fn search_column(&self, client_x: f64, max: u32) -> u32 {
        let origin = self.body_rect().left;
        search_leading_edge(client_x, max, |i| origin + self.grid.cumulative_width_before(i))
    }

    fn search_row(&self, client_y: f64, max: u32) -> u32 {
        let origin = self.body_rect().top;
        search_leading_edge(client_y, max, |i| origin + self.grid.cumulative_height_before(i))
    }
}

/// `ceil(text) + 2 * padding`, as whole pixels.
/// The cast is safe: the value is clamped to the `u32` range first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn padded_cell_width(text_width: f64, padding: f64) -> u32 {
    let width = text_width.ceil() + padding * 2.0;
    width.clamp(0.0, f64::from(u32::MAX)) as u32
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

    #[test]
    fn test_padded_cell_width() {
        assert_eq!(padded_cell_width(33.2, 10.0), 54);
        assert_eq!(padded_cell_width(0.0, 10.0), 20);
        assert_eq!(padded_cell_width(-50.0, 10.0), 0);
    }

    #[test]
    fn test_empty_grid_cell_resolves_to_origin() {
        let surface = StaticSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let locator = Locator::new(surface, Grid::default());
        assert_eq!(locator.convert_point_to_cell(50.0, 50.0), CellCoord::default());
        assert_eq!(locator.convert_point_to_column(50.0), None);
        assert_eq!(locator.convert_point_to_row(50.0), None);
    }
}
