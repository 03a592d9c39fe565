use std::{env, fs, path::PathBuf};

use reflex_core::store::{clear_record, load_record, save_record, FileStore, KeyValueStore, MemoryStore};
use reflex_core::{Attempt, Difficulty, GameRecord, Rank};
use reflex_schema::{LEGACY_HISTORY_KEY, RECORD_KEY};

fn temp_path(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("reflex_store_test_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir.join("nested").join("store.json")
}

fn sample_record() -> GameRecord {
    let mut record = GameRecord::default();
    record.record_success(Attempt {
        reaction_time_ms: 199,
        rank: Rank::Fast,
        difficulty: Difficulty::Hard,
        timestamp: "2026-10-14 09:30".to_string(),
    });
    record.record_early_tap();
    record
}

#[test]
fn test_legacy_array_is_discarded() {
    let mut store = MemoryStore::new().with_entry(LEGACY_HISTORY_KEY, "[250, 300, 410]");

    let record = load_record(&mut store);

    assert_eq!(record, GameRecord::default());
    assert!(!store.contains_key(LEGACY_HISTORY_KEY));
}

#[test]
fn test_legacy_array_does_not_touch_current_record() {
    let current = sample_record();
    let mut store = MemoryStore::new()
        .with_entry(LEGACY_HISTORY_KEY, "[120]")
        .with_entry(RECORD_KEY, &serde_json::to_string(&current).unwrap());

    let record = load_record(&mut store);

    assert_eq!(record, current);
    assert!(!store.contains_key(LEGACY_HISTORY_KEY));
}

#[test]
fn test_non_array_legacy_value_is_left_alone() {
    let mut store = MemoryStore::new().with_entry(LEGACY_HISTORY_KEY, r#"{"something":"else"}"#);
    load_record(&mut store);
    assert!(store.contains_key(LEGACY_HISTORY_KEY));
}

#[test]
fn test_inconsistent_record_is_repaired() {
    let mut store = MemoryStore::new().with_entry(
        RECORD_KEY,
        r#"{"history":[],"streak":3,"bestStreak":1,"tooEarly":2,"totalGames":40}"#,
    );
    let record = load_record(&mut store);
    assert_eq!(record.total_games, 2);
    assert_eq!(record.best_streak, 3);
    assert!(record.is_consistent());
}

#[test]
fn test_wrong_types_fall_back_to_zero() {
    let mut store = MemoryStore::new().with_entry(RECORD_KEY, r#"{"history":"oops"}"#);
    assert_eq!(load_record(&mut store), GameRecord::default());

    let mut store = MemoryStore::new().with_entry(RECORD_KEY, "[1,2,3]");
    assert_eq!(load_record(&mut store), GameRecord::default());
}

#[test]
fn test_file_store_round_trip_and_clear() {
    let path = temp_path("round_trip");

    let mut store = FileStore::new(&path);
    assert_eq!(store.get(RECORD_KEY).unwrap(), None);

    let record = sample_record();
    save_record(&mut store, &record).unwrap();
    assert!(path.exists());

    // A fresh handle sees the saved data.
    let mut reopened = FileStore::new(&path);
    assert_eq!(load_record(&mut reopened), record);

    clear_record(&mut reopened).unwrap();
    assert_eq!(reopened.get(RECORD_KEY).unwrap(), None);
    assert_eq!(load_record(&mut reopened), GameRecord::default());
}

#[test]
fn test_file_store_keeps_other_keys() {
    let path = temp_path("other_keys");
    let mut store = FileStore::new(&path);
    store.set("theme", "dark").unwrap();
    save_record(&mut store, &sample_record()).unwrap();
    clear_record(&mut store).unwrap();

    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_corrupt_file_yields_default_record() {
    let path = temp_path("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "this is not json").unwrap();

    let mut store = FileStore::new(&path);
    assert!(store.get(RECORD_KEY).is_err());
    assert_eq!(load_record(&mut store), GameRecord::default());

    // Saving replaces the unreadable file.
    save_record(&mut store, &sample_record()).unwrap();
    assert_eq!(load_record(&mut store), sample_record());
}
