//! Geometry primitives for locating cells.
//!
//! This module handles:
//! - Axis-aligned rects with half-open containment
//! - Pre-computing cumulative column/row offsets
//! - Binary search for efficient index lookup at pixel coordinates

mod grid;
mod rect;
pub mod search;

pub use grid::{Grid, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
pub use rect::Rect;
