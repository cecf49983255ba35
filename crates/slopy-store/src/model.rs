//! Persisted schedule records.
//!
//! The document shape is `{"users": {"<id>": {"schedule": [...], "playtime": [...], "games": [...]}}}`.
//! Range text is stored in canonical `"H-H"` form; it is parsed again when the
//! engine reads it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slopy_engine::Day;

/// One busy declaration for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: Day,
    /// Free-form label such as "work" or "school".
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

/// A preferred play window for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytimeEntry {
    pub day: Day,
    pub time: String,
}

/// Everything recorded for one user. All three lists are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    #[serde(default)]
    pub playtime: Vec<PlaytimeEntry>,
    #[serde(default)]
    pub games: Vec<String>,
}

impl UserProfile {
    /// Busy range texts for `day`, in insertion order.
    pub fn busy_on(&self, day: Day) -> Vec<String> {
        self.schedule
            .iter()
            .filter(|e| e.day == day)
            .map(|e| e.time.clone())
            .collect()
    }

    /// Preferred range texts for `day`, in insertion order.
    pub fn playtime_on(&self, day: Day) -> Vec<String> {
        self.playtime
            .iter()
            .filter(|e| e.day == day)
            .map(|e| e.time.clone())
            .collect()
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub users: BTreeMap<String, UserProfile>,
}
