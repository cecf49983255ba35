//! Busy ranges → free ranges across a whole day.
//!
//! Sorts busy ranges by start time and sweeps a cursor through the day. The
//! cursor only moves forward, so overlapping and adjacent busy ranges merge
//! without a separate merge pass.

use crate::time_range::{TimeRange, MINUTES_PER_DAY};

/// Free ranges covering `[0, 1440)` minus the union of `busy`.
///
/// `busy` may be unordered and overlapping. The result is sorted and
/// non-overlapping; no busy ranges yields the full day, and busy ranges
/// covering the whole day yield nothing.
pub fn complement(busy: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted = busy.to_vec();
    sorted.sort();

    let mut free = Vec::new();
    let mut cursor = 0;

    for range in &sorted {
        if cursor < range.start() {
            free.push(TimeRange::from_bounds(cursor, range.start()));
        }
        cursor = cursor.max(range.end());
    }

    // Trailing free time after the last busy range.
    if cursor < MINUTES_PER_DAY {
        free.push(TimeRange::from_bounds(cursor, MINUTES_PER_DAY));
    }

    free
}

/// Total free minutes in `busy`'s complement.
pub fn free_minutes(busy: &[TimeRange]) -> u32 {
    complement(busy)
        .iter()
        .map(|r| u32::from(r.duration_minutes()))
        .sum()
}
