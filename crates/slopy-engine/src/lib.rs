//! # slopy-engine
//!
//! Interval arithmetic behind the "when is everyone free" question.
//!
//! Busy and preferred ("playtime") windows arrive as `"H-H"` hour ranges for a
//! single day. The engine turns them into minute-level [`TimeRange`] values,
//! inverts busy time into free time, narrows free time to a preferred window,
//! and folds several users' free time into their mutual availability.
//!
//! Everything here is pure: no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`time_range`] — `TimeRange` value type and `"H-H"` parsing/rendering
//! - [`day`] — `Day` enumeration and `"Mon-Wed"` day-range expansion
//! - [`complement`] — busy ranges → free ranges across the whole day
//! - [`intersect`] — pairwise overlap of two range lists
//! - [`resolver`] — single-user and multi-user free-slot composition
//! - [`error`] — Error types

pub mod complement;
pub mod day;
pub mod error;
pub mod intersect;
pub mod resolver;
pub mod time_range;

pub use complement::complement;
pub use day::{expand_day_range, Day};
pub use error::ScheduleError;
pub use intersect::intersect;
pub use resolver::{
    mutual_free_ranges, mutual_free_slots, resolve_mutual, single_user_free_ranges,
    single_user_free_slots, ScheduleSource, SlotMatching, UserDay,
};
pub use time_range::{parse_range, TimeRange, MINUTES_PER_DAY};
