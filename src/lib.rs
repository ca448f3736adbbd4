//! tablegrid - pointer gestures and cell geometry for data tables
//!
//! The interaction core of a table widget, usable natively or from the browser
//! via WebAssembly:
//! - Gesture tracking: activate, drag, click and double-click disambiguation
//! - Point-to-cell lookup by binary search over cumulative row/column offsets
//! - Scroll-aware conversion between client space and grid indices
//! - Rendered-cell measurement for column auto-fit
//!
//! # Usage (Rust)
//!
//! ```
//! use tablegrid::layout::{Grid, Rect};
//! use tablegrid::locator::{Locator, StaticSurface};
//!
//! let surface = StaticSurface::new(Rect::new(100.0, 50.0, 60.0, 40.0));
//! let grid = Grid::new(vec![20.0, 20.0], vec![10.0, 20.0, 30.0]);
//! let locator = Locator::new(surface, grid);
//! assert_eq!(locator.convert_point_to_column(115.0), Some(1));
//! assert_eq!(locator.convert_point_to_row(49.0), None);
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { Locator } from 'tablegrid';
//! await init();
//! const locator = new Locator(tableEl, bodyEl, colWidths, rowHeights);
//! const col = locator.convertPointToColumn(event.clientX); // -1 when outside
//! ```

pub mod error;
pub mod fixture;
pub mod interactions;
pub mod layout;
pub mod locator;

// Browser bindings
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use error::{Result, TableError};
pub use interactions::{CoordinateData, DragEvents, DragHandler};
pub use layout::{Grid, Rect};
pub use locator::{CellCoord, Locator};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
