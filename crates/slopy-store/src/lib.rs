//! # slopy-store
//!
//! Per-user weekly schedules: busy declarations, preferred play windows, and
//! game lists.
//!
//! The store is the only shared mutable state in slopy. It sits behind a
//! read/write lock, persists every append atomically to a JSON file (or keeps
//! everything in memory), and implements [`slopy_engine::ScheduleSource`] so the
//! resolver can read from it directly.
//!
//! ## Modules
//!
//! - [`model`] — `UserProfile` and its entries, as persisted
//! - [`store`] — `ScheduleStore` with atomic appends and snapshot reads
//! - [`error`] — Error types

pub mod error;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use model::{PlaytimeEntry, ScheduleEntry, StoreData, UserProfile};
pub use store::ScheduleStore;
