//! Pairwise overlap of two range lists.
//!
//! Both inputs are expected to hold a handful of ranges per day, so every
//! `(a, b)` pair is compared directly.

use crate::time_range::TimeRange;

/// Overlaps between every range in `a` and every range in `b`.
///
/// Each overlap is `[max(a.start, b.start), min(a.end, b.end))`, kept only when
/// it has positive width; touching ranges contribute nothing. The result is
/// sorted by start time. When `a` and `b` are each disjoint, so is the result.
pub fn intersect(a: &[TimeRange], b: &[TimeRange]) -> Vec<TimeRange> {
    let mut overlaps = Vec::new();

    for x in a {
        for y in b {
            let start = x.start().max(y.start());
            let end = x.end().min(y.end());
            if start < end {
                overlaps.push(TimeRange::from_bounds(start, end));
            }
        }
    }

    overlaps.sort();
    overlaps
}
