//! Axis-aligned rectangle in pixel space.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
///
/// Containment is half-open on both axes: the left/top edge belongs to the
/// rect, the right/bottom edge does not. Adjacent rects therefore never
/// claim the same point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of the left edge
    pub left: f64,
    /// Y position of the top edge
    pub top: f64,
    /// Width (non-negative)
    pub width: f64,
    /// Height (non-negative)
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Copy the fields of a browser bounding box.
    #[cfg(target_arch = "wasm32")]
    pub fn wrap(bounds: &web_sys::DomRect) -> Self {
        Self::new(bounds.left(), bounds.top(), bounds.width(), bounds.height())
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True if `x` lies in `[left, right)`.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x < self.right()
    }

    /// True if `y` lies in `[top, bottom)`.
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    /// Smallest rect covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Same size, moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }
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
    fn test_derived_edges() {
        let rect = Rect::new(5.0, 10.0, 20.0, 30.0);
        assert_eq!(rect.right(), 25.0);
        assert_eq!(rect.bottom(), 40.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_x(0.0));
        assert!(rect.contains_x(9.999));
        assert!(!rect.contains_x(10.0));
        assert!(!rect.contains_x(-0.001));

        assert!(rect.contains_y(0.0));
        assert!(!rect.contains_y(10.0));
        assert!(rect.contains(5.0, 5.0));
        assert!(!rect.contains(5.0, 10.0));
    }

    #[test]
    fn test_zero_width_contains_nothing() {
        let rect = Rect::new(3.0, 3.0, 0.0, 5.0);
        assert!(rect.is_empty());
        assert!(!rect.contains_x(3.0));
    }

    #[test]
    fn test_nan_is_never_contained() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains_x(f64::NAN));
        assert!(!rect.contains_y(f64::NAN));
    }

    #[test]
    fn test_union_and_translate() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 5.0, 20.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 25.0, 25.0));
        assert_eq!(a.translate(-3.0, 4.0), Rect::new(-3.0, 4.0, 10.0, 10.0));
    }
}
