//! Snapshot table surface for native hosts, fixtures and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ScrollState, TableSurface};
use crate::layout::Rect;

/// Table geometry held as plain values instead of read from a live DOM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticSurface {
    pub table: Rect,
    pub body: Rect,
    #[serde(default)]
    pub scroll: ScrollState,
    /// Measured text widths of rendered body cells, by column
    #[serde(default)]
    pub cell_text_widths: BTreeMap<u32, Vec<f64>>,
    /// Measured text widths of rendered column header cells
    #[serde(default)]
    pub header_text_widths: Vec<f64>,
}

impl StaticSurface {
    /// A surface whose body fills the table and is not scrolled.
    pub fn new(table: Rect) -> Self {
        Self {
            table,
            body: table,
            scroll: ScrollState {
                client_width: table.width,
                client_height: table.height,
                ..ScrollState::default()
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Rect) -> Self {
        self.body = body;
        self.scroll.client_width = body.width;
        self.scroll.client_height = body.height;
        self
    }

    /// Scroll the body. The body's bounding box stays put, as it does in a
    /// browser; only the content moves.
    pub fn scroll_to(&mut self, left: f64, top: f64) {
        self.scroll.scroll_left = left;
        self.scroll.scroll_top = top;
    }
}

impl TableSurface for StaticSurface {
    fn table_bounds(&self) -> Rect {
        self.table
    }

    fn body_bounds(&self) -> Rect {
        self.body
    }

    fn body_scroll(&self) -> ScrollState {
        self.scroll
    }

    fn measure_cells(&self, column: u32) -> Vec<f64> {
        self.cell_text_widths
            .get(&column)
            .into_iter()
            .flatten()
            .chain(self.header_text_widths.iter())
            .copied()
            .collect()
    }
}
