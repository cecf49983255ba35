//! Minute-of-day ranges and their `"H-H"` text form.
//!
//! A [`TimeRange`] is a half-open interval `[start, end)` inside a single day,
//! measured in minutes from midnight. Ranges never cross midnight.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Minutes in one day; the exclusive upper bound of every range.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

const MAX_HOUR: u16 = 24;

/// A half-open `[start, end)` interval in minutes of a day.
///
/// Invariant: `0 <= start < end <= 1440`. Ordering is by `start`, then `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    /// Build a range from minute offsets, enforcing `start < end <= 1440`.
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidRange(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        if end > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidRange(format!(
                "end {} is past the end of the day",
                end
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole day, `[0, 1440)`.
    pub const fn full_day() -> Self {
        Self {
            start: 0,
            end: MINUTES_PER_DAY,
        }
    }

    // Callers guarantee the invariant; used by the sweep and overlap code.
    pub(crate) const fn from_bounds(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// `true` when the two ranges share at least one minute.
    ///
    /// Adjacent ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Parse `"H-H"` (whole hours, `0..=24`) into a [`TimeRange`].
///
/// Whitespace around either hour is ignored. Fails with
/// [`ScheduleError::InvalidRange`] when the text is not exactly two integers
/// separated by `-`, an hour is outside `0..=24`, or the range is empty or
/// reversed.
pub fn parse_range(text: &str) -> Result<TimeRange> {
    let invalid = |reason: &str| ScheduleError::InvalidRange(format!("'{}': {}", text, reason));

    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 2 {
        return Err(invalid("expected two hours separated by '-'"));
    }

    let mut hours = [0u16; 2];
    for (slot, part) in hours.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<u16>()
            .map_err(|_| invalid("hours must be whole numbers"))?;
        if *slot > MAX_HOUR {
            return Err(invalid("hours must be between 0 and 24"));
        }
    }

    let [start, end] = hours;
    if start >= end {
        return Err(invalid("start must be before end"));
    }

    Ok(TimeRange::from_bounds(start * 60, end * 60))
}

impl FromStr for TimeRange {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        parse_range(s)
    }
}

/// Renders as `"H-H"`, truncating both bounds to the whole hour.
impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start / 60, self.end / 60)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self> {
        parse_range(&value)
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

/// Parse every text in `texts`, stopping at the first malformed one.
pub(crate) fn parse_all<S: AsRef<str>>(texts: &[S]) -> Result<Vec<TimeRange>> {
    texts.iter().map(|t| parse_range(t.as_ref())).collect()
}
