//! Index search over monotonic leading edges.

/// Find the largest index `i` in `[0, max_index]` with `edge(i) <= target`.
///
/// `edge` must be non-decreasing. Targets before `edge(0)` (and NaN) resolve
/// to `0`; targets at or past `edge(max_index)` resolve to `max_index`.
/// Runs in `O(log n)` probes of `edge`.
pub fn search_leading_edge(target: f64, max_index: u32, edge: impl Fn(u32) -> f64) -> u32 {
    last_index_where(max_index, |i| edge(i) <= target)
}

/// Find the largest index `i` in `[0, max_index]` with `edge(i) < target`.
///
/// This is the last index whose span starts strictly before an exclusive
/// end coordinate, i.e. the last one a half-open range `[.., target)` touches.
pub fn search_before_edge(target: f64, max_index: u32, edge: impl Fn(u32) -> f64) -> u32 {
    last_index_where(max_index, |i| edge(i) < target)
}

/// Binary search for the last index satisfying a predicate that holds on a
/// prefix of `[0, max_index]`. Falls back to `0`.
fn last_index_where(max_index: u32, holds: impl Fn(u32) -> bool) -> u32 {
    let mut lo = 0u32;
    let mut hi = max_index;
    while lo < hi {
        // Upper midpoint so `lo = mid` always makes progress
        let mid = lo + (hi - lo).div_ceil(2);
        if holds(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
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
    use std::cell::Cell;

    fn edges(values: &[f64]) -> impl Fn(u32) -> f64 + '_ {
        move |i| values[i as usize]
    }

    #[test]
    fn test_finds_containing_interval() {
        let e = [0.0, 10.0, 30.0];
        assert_eq!(search_leading_edge(0.0, 2, edges(&e)), 0);
        assert_eq!(search_leading_edge(9.9, 2, edges(&e)), 0);
        assert_eq!(search_leading_edge(10.0, 2, edges(&e)), 1);
        assert_eq!(search_leading_edge(29.0, 2, edges(&e)), 1);
        assert_eq!(search_leading_edge(30.0, 2, edges(&e)), 2);
    }

    #[test]
    fn test_clamps_both_ends() {
        let e = [100.0, 110.0, 130.0];
        assert_eq!(search_leading_edge(-5.0, 2, edges(&e)), 0);
        assert_eq!(search_leading_edge(1e9, 2, edges(&e)), 2);
        assert_eq!(search_leading_edge(f64::NAN, 2, edges(&e)), 0);
    }

    #[test]
    fn test_single_index() {
        let e = [50.0];
        assert_eq!(search_leading_edge(0.0, 0, edges(&e)), 0);
        assert_eq!(search_leading_edge(500.0, 0, edges(&e)), 0);
    }

    #[test]
    fn test_zero_width_entries_pick_last_equal_edge() {
        // Column 1 is hidden (zero width), so edges 1 and 2 coincide
        let e = [0.0, 10.0, 10.0, 20.0];
        assert_eq!(search_leading_edge(10.0, 3, edges(&e)), 2);
        assert_eq!(search_leading_edge(15.0, 3, edges(&e)), 2);
    }

    #[test]
    fn test_before_edge_excludes_touching_boundary() {
        let e = [0.0, 10.0, 30.0];
        assert_eq!(search_before_edge(10.0, 2, edges(&e)), 0);
        assert_eq!(search_before_edge(10.5, 2, edges(&e)), 1);
        assert_eq!(search_before_edge(30.0, 2, edges(&e)), 1);
        assert_eq!(search_before_edge(1e9, 2, edges(&e)), 2);
        assert_eq!(search_before_edge(f64::NAN, 2, edges(&e)), 0);
    }

    #[test]
    fn test_logarithmic_probe_count() {
        let probes = Cell::new(0u32);
        let max = 1_000_000u32;
        let found = search_leading_edge(654_321.5, max, |i| {
            probes.set(probes.get() + 1);
            f64::from(i)
        });
        assert_eq!(found, 654_321);
        assert!(probes.get() <= 21, "probes: {}", probes.get());
    }
}
