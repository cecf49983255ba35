//! Tests for the schedule store: appends, persistence, and snapshot reads.

use std::sync::Arc;
use std::thread;

use slopy_engine::{resolve_mutual, Day, ScheduleError, ScheduleSource, SlotMatching};
use slopy_store::{ScheduleStore, StoreError};

fn rendered(ranges: &[slopy_engine::TimeRange]) -> Vec<String> {
    ranges.iter().map(ToString::to_string).collect()
}

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── Appends ─────────────────────────────────────────────────────────────────

#[test]
fn busy_declaration_expands_across_days() {
    let store = ScheduleStore::in_memory();
    let days = store.add_busy("alice", "work", "mon-wed", "9-17").unwrap();
    assert_eq!(days, vec![Day::Mon, Day::Tue, Day::Wed]);

    let profile = store.profile("alice").unwrap().unwrap();
    assert_eq!(profile.schedule.len(), 3);
    assert!(profile.schedule.iter().all(|e| e.kind == "work" && e.time == "9-17"));
    assert_eq!(profile.busy_on(Day::Tue), vec!["9-17"]);
    assert!(profile.busy_on(Day::Thu).is_empty());
}

#[test]
fn profile_is_created_lazily_on_first_write() {
    let store = ScheduleStore::in_memory();
    assert!(!store.contains("bob").unwrap());
    assert!(store.profile("bob").unwrap().is_none());

    store.add_game("bob", "chess").unwrap();
    let profile = store.profile("bob").unwrap().unwrap();
    assert_eq!(profile.games, vec!["chess"]);
    assert!(profile.schedule.is_empty());
    assert!(profile.playtime.is_empty());
}

#[test]
fn ranges_are_stored_in_canonical_form() {
    let store = ScheduleStore::in_memory();
    store.add_busy("alice", "work", "fri", " 09 - 17 ").unwrap();
    let (day, time) = store.add_playtime("alice", "FRI", "018-23").unwrap();
    assert_eq!((day, time.as_str()), (Day::Fri, "18-23"));

    let profile = store.profile("alice").unwrap().unwrap();
    assert_eq!(profile.busy_on(Day::Fri), vec!["9-17"]);
    assert_eq!(profile.playtime_on(Day::Fri), vec!["18-23"]);
}

#[test]
fn invalid_arguments_are_rejected_without_writing() {
    let store = ScheduleStore::in_memory();

    let err = store.add_busy("alice", "work", "mon-xyz", "9-17").unwrap_err();
    assert!(matches!(err, StoreError::Schedule(ScheduleError::InvalidDay(_))));

    let err = store.add_busy("alice", "work", "sat-mon", "9-17").unwrap_err();
    assert!(matches!(err, StoreError::Schedule(ScheduleError::InvalidDay(_))));

    let err = store.add_playtime("alice", "mon", "9-9").unwrap_err();
    assert!(matches!(err, StoreError::Schedule(ScheduleError::InvalidRange(_))));

    let err = store.add_game("alice", "   ").unwrap_err();
    assert!(matches!(err, StoreError::EmptyField("game")));

    let err = store.add_busy("alice", "", "mon", "9-17").unwrap_err();
    assert!(matches!(err, StoreError::EmptyField(_)));

    assert!(!store.contains("alice").unwrap());
}

#[test]
fn games_are_collected_per_user_and_overall() {
    let store = ScheduleStore::in_memory();
    store.add_game("alice", "chess").unwrap();
    store.add_game("bob", "go").unwrap();
    store.add_game("alice", "poker").unwrap();

    assert_eq!(store.games_for(&["alice"]).unwrap(), vec!["chess", "poker"]);
    assert_eq!(
        store.games_for(&["bob", "alice", "nobody"]).unwrap(),
        vec!["go", "chess", "poker"]
    );

    let mut all = store.all_games().unwrap();
    all.sort();
    assert_eq!(all, vec!["chess", "go", "poker"]);
    assert_eq!(store.user_ids().unwrap(), vec!["alice", "bob"]);
}

// ── ScheduleSource ──────────────────────────────────────────────────────────

#[test]
fn source_filters_by_day_and_kind() {
    let store = ScheduleStore::in_memory();
    store.add_busy("alice", "work", "mon-fri", "9-17").unwrap();
    store.add_busy("alice", "gym", "mon", "18-19").unwrap();
    store.add_playtime("alice", "mon", "19-23").unwrap();

    assert_eq!(store.busy_ranges("alice", Day::Mon).unwrap(), vec!["9-17", "18-19"]);
    assert_eq!(store.busy_ranges("alice", Day::Tue).unwrap(), vec!["9-17"]);
    assert!(store.busy_ranges("alice", Day::Sat).unwrap().is_empty());
    assert_eq!(store.preferred_ranges("alice", Day::Mon).unwrap(), vec!["19-23"]);
}

#[test]
fn source_reports_unknown_user() {
    let store = ScheduleStore::in_memory();
    assert_eq!(
        store.busy_ranges("ghost", Day::Mon).unwrap_err(),
        ScheduleError::UnknownUser("ghost".to_string())
    );
}

#[test]
fn resolver_reads_mutual_time_from_the_store() {
    let store = ScheduleStore::in_memory();
    store.add_busy("alice", "work", "mon-fri", "9-17").unwrap();
    store.add_playtime("alice", "wed", "18-23").unwrap();
    store.add_busy("bob", "school", "wed", "8-20").unwrap();

    let mutual = resolve_mutual(&store, &["alice", "bob"], Day::Wed, SlotMatching::Overlap).unwrap();
    assert_eq!(rendered(&mutual), vec!["20-23"]);

    let err = resolve_mutual(&store, &["alice", "carol"], Day::Wed, SlotMatching::Overlap)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownUser(id) if id == "carol"));
}

// ── Persistence ─────────────────────────────────────────────────────────────

#[test]
fn missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = ScheduleStore::open(dir.path().join("data.json")).unwrap();
    assert!(store.user_ids().unwrap().is_empty());
}

#[test]
fn appends_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    {
        let store = ScheduleStore::open(&path).unwrap();
        store.add_busy("alice", "work", "mon-tue", "9-17").unwrap();
        store.add_playtime("alice", "mon", "18-23").unwrap();
        store.add_game("alice", "chess").unwrap();
    }

    let reopened = ScheduleStore::open(&path).unwrap();
    let profile = reopened.profile("alice").unwrap().unwrap();
    assert_eq!(profile.schedule.len(), 2);
    assert_eq!(profile.playtime_on(Day::Mon), vec!["18-23"]);
    assert_eq!(profile.games, vec!["chess"]);
}

#[test]
fn persisted_document_uses_the_bot_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = ScheduleStore::open(&path).unwrap();
    store.add_busy("42", "work", "mon", "9-17").unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["users"]["42"]["schedule"][0]["day"], "Mon");
    assert_eq!(doc["users"]["42"]["schedule"][0]["type"], "work");
    assert_eq!(doc["users"]["42"]["schedule"][0]["time"], "9-17");
    assert_eq!(doc["users"]["42"]["playtime"], serde_json::json!([]));
    assert_eq!(dir_entries(dir.path()), vec!["data.json"]);
}

#[test]
fn loads_documents_with_missing_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"users": {"7": {"games": ["go"]}, "8": {"schedule": [{"day": "Tue", "type": "work", "time": "9-17"}]}}}"#,
    )
    .unwrap();

    let store = ScheduleStore::open(&path).unwrap();
    assert_eq!(store.games_for(&["7"]).unwrap(), vec!["go"]);
    assert_eq!(store.busy_ranges("8", Day::Tue).unwrap(), vec!["9-17"]);
    assert!(store.preferred_ranges("8", Day::Tue).unwrap().is_empty());
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = ScheduleStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn failed_persist_leaves_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directory does not exist, so every write fails.
    let store = ScheduleStore::open(dir.path().join("missing").join("data.json")).unwrap();

    let err = store.add_game("alice", "chess").unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(!store.contains("alice").unwrap());
}

#[test]
fn concurrent_appends_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = Arc::new(ScheduleStore::open(&path).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let user = format!("user-{}", t % 2);
                for i in 0..10 {
                    store.add_game(&user, &format!("game-{}-{}", t, i)).unwrap();
                    // Readers never see a half-applied append.
                    let profile = store.profile(&user).unwrap().unwrap();
                    assert!(!profile.games.is_empty());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.all_games().unwrap().len(), 80);
    let reopened = ScheduleStore::open(&path).unwrap();
    assert_eq!(reopened.all_games().unwrap().len(), 80);
    assert_eq!(reopened.games_for(&["user-0"]).unwrap().len(), 40);
}

#[test]
fn repeated_appends_leave_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = ScheduleStore::open(&path).unwrap();

    for i in 0..5 {
        store.add_game("alice", &format!("game-{}", i)).unwrap();
    }
    assert!(store.add_game("alice", "").is_err());

    assert_eq!(dir_entries(dir.path()), vec!["data.json"]);
    assert_eq!(ScheduleStore::open(&path).unwrap().all_games().unwrap().len(), 5);
}

#[test]
fn separate_handles_on_one_file_do_not_clobber_temp_files() {
    // Two handles stand in for two processes: each has its own lock.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let first = Arc::new(ScheduleStore::open(&path).unwrap());
    let second = Arc::new(ScheduleStore::open(&path).unwrap());

    let handles: Vec<_> = [("alice", first), ("bob", second)]
        .into_iter()
        .map(|(user, store)| {
            thread::spawn(move || {
                for i in 0..25 {
                    store.add_game(user, &format!("game-{}", i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Last writer wins across handles, but the file is always a whole document.
    let reopened = ScheduleStore::open(&path).unwrap();
    let total = reopened.all_games().unwrap().len();
    assert!(total >= 25, "expected at least one handle's games, got {}", total);
    assert_eq!(dir_entries(dir.path()), vec!["data.json"]);
}
