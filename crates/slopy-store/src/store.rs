//! Schedule store: a lock-guarded document with optional file persistence.
//!
//! Appends are applied to a copy of the document, written to a uniquely named
//! temp file beside the target, synced, and renamed over the target (with the
//! directory synced after the rename) before the copy is published to readers.
//! A crash or a failed write therefore leaves both the file and the in-memory
//! view at the last committed state, and readers only ever observe fully
//! applied appends.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use slopy_engine::{expand_day_range, parse_range, Day, ScheduleError, ScheduleSource};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::model::{PlaytimeEntry, ScheduleEntry, StoreData, UserProfile};

/// Per-user schedules, shared between concurrent command handlers.
#[derive(Debug)]
pub struct ScheduleStore {
    data: RwLock<StoreData>,
    path: Option<PathBuf>,
}

impl ScheduleStore {
    /// Open the store backed by `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let text = fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&text)?;
            debug!(path = %path.display(), users = data.users.len(), "loaded schedule store");
            data
        } else {
            debug!(path = %path.display(), "no store file yet, starting empty");
            StoreData::default()
        };

        Ok(Self {
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record `kind` busy time on every day in `days` (e.g. `"mon-fri"`).
    ///
    /// Returns the days the entry was added to.
    pub fn add_busy(&self, user_id: &str, kind: &str, days: &str, range: &str) -> Result<Vec<Day>> {
        let kind = non_empty(kind, "busy type")?;
        let days = expand_day_range(days)?;
        let time = parse_range(range)?.to_string();

        self.append(user_id, |profile| {
            profile
                .schedule
                .extend(days.iter().map(|&day| ScheduleEntry {
                    day,
                    kind: kind.to_string(),
                    time: time.clone(),
                }));
        })?;

        info!(user = user_id, kind, ?days, %time, "busy time added");
        Ok(days)
    }

    /// Record a preferred play window on `day`.
    pub fn add_playtime(&self, user_id: &str, day: &str, range: &str) -> Result<(Day, String)> {
        let day: Day = day.parse()?;
        let time = parse_range(range)?.to_string();

        self.append(user_id, |profile| {
            profile.playtime.push(PlaytimeEntry {
                day,
                time: time.clone(),
            });
        })?;

        info!(user = user_id, %day, %time, "playtime added");
        Ok((day, time))
    }

    /// Add a game to the user's list.
    pub fn add_game(&self, user_id: &str, game: &str) -> Result<()> {
        let game = non_empty(game, "game")?;

        self.append(user_id, |profile| profile.games.push(game.to_string()))?;

        info!(user = user_id, game, "game added");
        Ok(())
    }

    /// Snapshot of one user's profile.
    pub fn profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    pub fn contains(&self, user_id: &str) -> Result<bool> {
        Ok(self.read()?.users.contains_key(user_id))
    }

    /// All known user ids, sorted.
    pub fn user_ids(&self) -> Result<Vec<String>> {
        Ok(self.read()?.users.keys().cloned().collect())
    }

    /// Games of the given users, in argument order. Unknown users contribute nothing.
    pub fn games_for<U: AsRef<str>>(&self, user_ids: &[U]) -> Result<Vec<String>> {
        let data = self.read()?;
        Ok(user_ids
            .iter()
            .filter_map(|id| data.users.get(id.as_ref()))
            .flat_map(|profile| profile.games.iter().cloned())
            .collect())
    }

    /// Games of every user.
    pub fn all_games(&self) -> Result<Vec<String>> {
        let data = self.read()?;
        Ok(data
            .users
            .values()
            .flat_map(|profile| profile.games.iter().cloned())
            .collect())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreData>> {
        self.data.read().map_err(|_| StoreError::Poisoned)
    }

    /// Apply `update` to the user's profile (creating it if needed), persist, then publish.
    fn append(&self, user_id: &str, update: impl FnOnce(&mut UserProfile)) -> Result<()> {
        let mut guard = self.data.write().map_err(|_| StoreError::Poisoned)?;

        let mut next = guard.clone();
        update(next.users.entry(user_id.to_string()).or_default());

        if let Some(path) = &self.path {
            persist(path, &next)?;
        }

        *guard = next;
        Ok(())
    }
}

impl ScheduleSource for ScheduleStore {
    fn busy_ranges(&self, user_id: &str, day: Day) -> slopy_engine::error::Result<Vec<String>> {
        self.with_profile(user_id, |profile| profile.busy_on(day))
    }

    fn preferred_ranges(&self, user_id: &str, day: Day) -> slopy_engine::error::Result<Vec<String>> {
        self.with_profile(user_id, |profile| profile.playtime_on(day))
    }
}

impl ScheduleStore {
    fn with_profile<T>(
        &self,
        user_id: &str,
        f: impl FnOnce(&UserProfile) -> T,
    ) -> slopy_engine::error::Result<T> {
        // A poisoned lock still holds the last fully published document.
        let data = self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        data.users
            .get(user_id)
            .map(f)
            .ok_or_else(|| ScheduleError::UnknownUser(user_id.to_string()))
    }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    Ok(trimmed)
}

fn persist(path: &Path, data: &StoreData) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the temp file on any error below removes it.
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, data)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    sync_dir(dir)?;

    debug!(path = %path.display(), users = data.users.len(), "persisted schedule store");
    Ok(())
}

/// Make the rename durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

// Directories cannot be opened as files here; the rename is already durable.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}
