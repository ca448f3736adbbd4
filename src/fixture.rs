//! JSON snapshots of table geometry.
//!
//! A fixture records everything the [`Locator`] reads from a live table
//! (sizes, bounding boxes, scroll state, measured text) so lookups can be
//! replayed off-browser by the CLI and by tests.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::layout::{Grid, Rect};
use crate::locator::{CellCoord, Locator, LocatorConfig, StaticSurface, TableSurface};

/// Serialized table geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFixture {
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub surface: StaticSurface,
    #[serde(default)]
    pub locator: LocatorConfig,
}

impl TableFixture {
    /// Parse and validate a fixture.
    ///
    /// # Errors
    /// Returns an error on malformed JSON or invalid geometry.
    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: Self = serde_json::from_str(json)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Read, parse and validate a fixture file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject sizes a browser could never report.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidGeometry`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        check_sizes("col_widths", &self.col_widths)?;
        check_sizes("row_heights", &self.row_heights)?;
        check_rect("table", &self.surface.table)?;
        check_rect("body", &self.surface.body)?;
        let scroll = &self.surface.scroll;
        check_sizes(
            "scroll",
            &[
                scroll.scroll_left,
                scroll.scroll_top,
                scroll.client_width,
                scroll.client_height,
            ],
        )?;
        let padding = self.locator.cell_horizontal_padding;
        if !padding.is_finite() || padding < 0.0 {
            return Err(TableError::InvalidGeometry(format!(
                "cell_horizontal_padding is {padding}"
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.row_heights.clone(), self.col_widths.clone())
    }

    pub fn into_locator(self) -> Locator<StaticSurface> {
        let grid = self.grid();
        Locator::with_config(self.surface, grid, self.locator)
    }
}

/// Every lookup the locator offers for one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointProbe {
    pub x: f64,
    pub y: f64,
    /// `None` when outside the table's horizontal extent
    pub column: Option<u32>,
    /// `None` when outside the table's vertical extent
    pub row: Option<u32>,
    /// Clamped cell, regardless of bounds
    pub cell: CellCoord,
}

pub fn probe<S: TableSurface>(locator: &Locator<S>, x: f64, y: f64) -> PointProbe {
    PointProbe {
        x,
        y,
        column: locator.convert_point_to_column(x),
        row: locator.convert_point_to_row(y),
        cell: locator.convert_point_to_cell(x, y),
    }
}

fn check_sizes(field: &str, values: &[f64]) -> Result<()> {
    match values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        Some((i, v)) => Err(TableError::InvalidGeometry(format!("{field}[{i}] is {v}"))),
        None => Ok(()),
    }
}

fn check_rect(field: &str, rect: &Rect) -> Result<()> {
    if !rect.left.is_finite() || !rect.top.is_finite() {
        return Err(TableError::InvalidGeometry(format!(
            "{field} origin is not finite"
        )));
    }
    check_sizes(field, &[rect.width, rect.height])
}
