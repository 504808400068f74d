//! Tests for roster persistence.

use spinner_xo::{
    FileStore, KeyValueStore, Mark, MemoryStore, Player, PlayerId, RosterRecord, RosterStore,
    STORAGE_KEY, Settings,
};

fn sample_record() -> RosterRecord {
    let alice = Player::with_id(PlayerId::new("a"), "Alice", Mark::X);
    let bob = Player::with_id(PlayerId::new("b"), "Bob", Mark::O);
    RosterRecord::new(
        vec![alice, bob],
        Settings {
            avoid_repeat: false,
        },
        Some(PlayerId::new("b")),
    )
}

#[test]
fn test_missing_record_yields_default() {
    let store = RosterStore::new(MemoryStore::new());
    let record = store.load(RosterRecord::default());
    assert!(record.players().is_empty());
    assert!(record.settings().avoid_repeat);
    assert_eq!(*record.last_picked_player_id(), None);
}

#[test]
fn test_memory_round_trip() {
    let mut store = RosterStore::new(MemoryStore::new());
    let record = sample_record();
    store.save(&record).expect("memory write");
    assert_eq!(store.load(RosterRecord::default()), record);
}

#[test]
fn test_file_round_trip_and_clear() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data_dir = dir.path().join("nested");
    let mut store = RosterStore::new(FileStore::new(&data_dir));
    let record = sample_record();

    store.save(&record).expect("file write");
    assert!(data_dir.join(format!("{}.json", STORAGE_KEY)).exists());

    let reopened = RosterStore::new(FileStore::new(&data_dir));
    assert_eq!(reopened.load(RosterRecord::default()), record);

    store.clear().expect("clear");
    assert_eq!(
        store.load(RosterRecord::default()),
        RosterRecord::default()
    );
    // Clearing twice is fine.
    store.clear().expect("second clear");
}

#[test]
fn test_corrupt_record_yields_default() {
    let store = RosterStore::new(MemoryStore::with_entry(STORAGE_KEY, "{not json"));
    assert_eq!(store.load(RosterRecord::default()), RosterRecord::default());
}

#[test]
fn test_stored_json_uses_camel_case_fields() {
    let mut store = RosterStore::new(MemoryStore::new());
    store.save(&sample_record()).expect("memory write");

    let raw = store
        .backend()
        .get(STORAGE_KEY)
        .expect("memory read")
        .expect("value present");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    assert_eq!(json["players"][0]["name"], "Alice");
    assert_eq!(json["players"][0]["mark"], "X");
    assert_eq!(json["players"][1]["mark"], "O");
    assert_eq!(json["settings"]["avoidRepeat"], false);
    assert_eq!(json["lastPickedPlayerId"], "b");
}

#[test]
fn test_record_without_optional_fields_loads_with_defaults() {
    let raw = r#"{"players":[{"id":"a","name":"Alice","mark":"X"}]}"#;
    let store = RosterStore::new(MemoryStore::with_entry(STORAGE_KEY, raw));
    let record = store.load(RosterRecord::default());
    assert_eq!(record.players().len(), 1);
    assert!(record.settings().avoid_repeat);
    assert_eq!(*record.last_picked_player_id(), None);
}

#[test]
fn test_last_pick_only_effective_while_on_roster() {
    let mut record = sample_record();
    assert_eq!(record.effective_last_picked(), Some(&PlayerId::new("b")));

    record.set_last_picked(PlayerId::new("gone"));
    assert_eq!(record.effective_last_picked(), None);

    record.set_last_picked(PlayerId::new("b"));
    let removed = record.remove_player(&PlayerId::new("b")).expect("bob present");
    assert_eq!(removed.name(), "Bob");
    assert_eq!(*record.last_picked_player_id(), None);
}

#[test]
fn test_replacing_players_forgets_last_pick() {
    let mut record = sample_record();
    record.replace_players(vec![Player::new("Carol", Mark::X)]);
    assert_eq!(*record.last_picked_player_id(), None);
    assert!(!record.has_both_teams());
}

fn stored(players: Vec<Player>) -> RosterStore<MemoryStore> {
    let record = RosterRecord::new(players, Settings::default(), None);
    let raw = serde_json::to_string(&record).expect("serializable");
    RosterStore::new(MemoryStore::with_entry(STORAGE_KEY, raw))
}

#[test]
fn test_oversized_record_yields_default() {
    let players = (0..14)
        .map(|i| {
            let mark = if i % 2 == 0 { Mark::X } else { Mark::O };
            Player::with_id(PlayerId::new(format!("id{}", i)), format!("P{}", i), mark)
        })
        .collect();
    let record = stored(players).load(RosterRecord::default());
    assert_eq!(record, RosterRecord::default());
}

#[test]
fn test_record_with_rule_breaking_players_yields_default() {
    let x = |id: &str, name: &str| Player::with_id(PlayerId::new(id), name, Mark::X);
    let o = |id: &str, name: &str| Player::with_id(PlayerId::new(id), name, Mark::O);

    let empty_name = stored(vec![x("a", "Alice"), o("b", "  ")]);
    assert_eq!(empty_name.load(RosterRecord::default()), RosterRecord::default());

    let same_name = stored(vec![x("a", "P0"), o("b", "p0")]);
    assert_eq!(same_name.load(RosterRecord::default()), RosterRecord::default());

    let same_id = stored(vec![x("a", "Alice"), o("a", "Bob")]);
    assert_eq!(same_id.load(RosterRecord::default()), RosterRecord::default());
}

#[test]
fn test_one_sided_record_still_loads() {
    let alice = Player::with_id(PlayerId::new("a"), "Alice", Mark::X);
    let record = stored(vec![alice.clone()]).load(RosterRecord::default());
    assert_eq!(record.players(), &[alice]);
}
