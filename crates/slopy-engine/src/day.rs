//! Days of the week and `"Mon-Wed"` day ranges.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// A day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// All seven days in week order.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Zero-based position in the week (`Mon == 0`).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the three-letter abbreviation in any letter case.
impl FromStr for Day {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ScheduleError::InvalidDay(format!("'{}' is not one of Mon..Sun", s)))
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

/// Expand `"Mon-Wed"` into `[Mon, Tue, Wed]`; a lone `"Tue"` yields `[Tue]`.
///
/// Ranges run forward through the week only. A range whose end comes before
/// its start (`"Sat-Mon"`) is rejected rather than wrapped or silently emptied.
pub fn expand_day_range(text: &str) -> Result<Vec<Day>> {
    let parts: Vec<&str> = text.split('-').collect();
    let (first, last) = match parts.as_slice() {
        [single] => {
            let day: Day = single.parse()?;
            (day, day)
        }
        [first, last] => (first.parse::<Day>()?, last.parse::<Day>()?),
        _ => {
            return Err(ScheduleError::InvalidDay(format!(
                "'{}' must be a day or a range like Mon-Wed",
                text
            )))
        }
    };

    if first > last {
        return Err(ScheduleError::InvalidDay(format!(
            "'{}' wraps past Sunday; split it into two ranges",
            text
        )));
    }

    Ok(Day::ALL[first.index()..=last.index()].to_vec())
}
