//! Free-slot resolution for one user and for a group of users.
//!
//! A user's free time on a day is the complement of their busy ranges,
//! optionally narrowed to their preferred play windows. A group's mutual free
//! time is the set of slots every member has, seeded with the first member.
//! [`SlotMatching::Overlap`] instead folds the members' ranges minute by minute.
//!
//! Range text is parsed up front: one malformed `"H-H"` anywhere aborts the
//! whole call with `InvalidRange`. There are no partial results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::complement::complement;
use crate::day::Day;
use crate::error::Result;
use crate::intersect::intersect;
use crate::time_range::{parse_all, TimeRange};

/// How free ranges from different users are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotMatching {
    /// Keep only slots that appear with identical bounds for every user.
    #[default]
    Exact,
    /// Keep every minute all users have free, splitting slots where needed.
    Overlap,
}

/// One user's busy and preferred ranges for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserDay {
    pub user_id: String,
    /// Busy ranges as `"H-H"` text.
    pub busy: Vec<String>,
    /// Preferred play windows as `"H-H"` text. Empty means no preference.
    #[serde(default)]
    pub preferred: Vec<String>,
}

/// Read access to stored schedules, one user and one day at a time.
///
/// Both accessors return `"H-H"` text in insertion order and fail with
/// [`ScheduleError::UnknownUser`](crate::ScheduleError::UnknownUser) when the
/// user has no profile.
pub trait ScheduleSource {
    fn busy_ranges(&self, user_id: &str, day: Day) -> Result<Vec<String>>;

    fn preferred_ranges(&self, user_id: &str, day: Day) -> Result<Vec<String>>;
}

/// Free ranges for one user, given busy and preferred `"H-H"` texts.
pub fn single_user_free_ranges<B, P>(busy: &[B], preferred: &[P]) -> Result<Vec<TimeRange>>
where
    B: AsRef<str>,
    P: AsRef<str>,
{
    let busy = parse_all(busy)?;
    let preferred = parse_all(preferred)?;
    Ok(free_within(&busy, &preferred))
}

/// [`single_user_free_ranges`] rendered back to `"H-H"` text.
pub fn single_user_free_slots<B, P>(busy: &[B], preferred: &[P]) -> Result<Vec<String>>
where
    B: AsRef<str>,
    P: AsRef<str>,
{
    single_user_free_ranges(busy, preferred).map(render)
}

/// Mutual free ranges across `users`, sorted by `(start, end)`.
///
/// An empty user list yields no ranges.
pub fn mutual_free_ranges(users: &[UserDay], matching: SlotMatching) -> Result<Vec<TimeRange>> {
    // Parse everything before folding so a bad range in the last user still fails the call.
    let free_per_user = users
        .iter()
        .map(|u| single_user_free_ranges(&u.busy, &u.preferred))
        .collect::<Result<Vec<_>>>()?;

    let mut per_user = free_per_user.into_iter();
    let Some(seed) = per_user.next() else {
        return Ok(Vec::new());
    };

    let mutual = match matching {
        SlotMatching::Overlap => per_user.fold(seed, |acc, free| intersect(&acc, &free)),
        SlotMatching::Exact => {
            let seed: BTreeSet<TimeRange> = seed.into_iter().collect();
            per_user
                .fold(seed, |acc, free| {
                    let free: BTreeSet<TimeRange> = free.into_iter().collect();
                    acc.intersection(&free).copied().collect()
                })
                .into_iter()
                .collect()
        }
    };

    Ok(mutual)
}

/// [`mutual_free_ranges`] rendered back to `"H-H"` text.
pub fn mutual_free_slots(users: &[UserDay], matching: SlotMatching) -> Result<Vec<String>> {
    mutual_free_ranges(users, matching).map(render)
}

/// Gather each user's ranges for `day` from `source` and resolve their mutual free time.
///
/// Fails with `UnknownUser` for the first id `source` does not know.
pub fn resolve_mutual<S, U>(
    source: &S,
    user_ids: &[U],
    day: Day,
    matching: SlotMatching,
) -> Result<Vec<TimeRange>>
where
    S: ScheduleSource + ?Sized,
    U: AsRef<str>,
{
    let users = user_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            Ok(UserDay {
                user_id: id.to_string(),
                busy: source.busy_ranges(id, day)?,
                preferred: source.preferred_ranges(id, day)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    mutual_free_ranges(&users, matching)
}

fn free_within(busy: &[TimeRange], preferred: &[TimeRange]) -> Vec<TimeRange> {
    let free = complement(busy);

    // No preference declared: the whole complement stays free. Intersecting with
    // an empty list would instead wipe out every slot.
    if preferred.is_empty() {
        return free;
    }

    // Windows are not merged: each free × window pair yields its own slot.
    let mut slots = intersect(&free, preferred);
    slots.dedup();
    slots
}

fn render(ranges: Vec<TimeRange>) -> Vec<String> {
    ranges.iter().map(TimeRange::to_string).collect()
}
