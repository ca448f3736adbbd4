//! Per-event coordinate bookkeeping for drag gestures.

use serde::Serialize;

/// A point in client (viewport) space, `[x, y]`.
pub type Point = [f64; 2];

/// Coordinates reported with every drag-move and drag-end callback.
///
/// All points are in client space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateData {
    /// Where the pointer went down
    pub activation: Point,
    /// Where the pointer is for this event
    pub current: Point,
    /// Where the pointer was on the previous event
    pub last: Point,
    /// `current - last`
    pub delta: Point,
    /// `current - activation`
    pub offset: Point,
}

impl CoordinateData {
    pub fn new(activation: Point, last: Point, current: Point) -> Self {
        Self {
            activation,
            current,
            last,
            delta: sub(current, last),
            offset: sub(current, activation),
        }
    }
}

fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1]]
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
    fn test_delta_and_offset() {
        let data = CoordinateData::new([10.0, 10.0], [14.0, 9.0], [20.0, 5.0]);
        assert_eq!(data.delta, [6.0, -4.0]);
        assert_eq!(data.offset, [10.0, -5.0]);
        assert_eq!(data.last, [14.0, 9.0]);
    }
}
