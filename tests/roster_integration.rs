//! Roster, formation and persistence tests.

use std::fs;
use std::sync::{Arc, Mutex};

use formationboard::board::Board;
use formationboard::math::Vec2;
use formationboard::resources::boardconfig::BoardConfig;
use formationboard::resources::kvstore::{JsonDirStore, KeyValueStore, MemoryStore, StoreError};
use formationboard::resources::roster::{
    FORMATIONS_KEY, PLAYERS_KEY, Player, Position, Roster, SELECTED_FORMATION_KEY,
    SHOW_TIMES_KEY,
};
use formationboard::systems::time::SimulatedFrames;

#[test]
fn new_players_start_on_the_bench() {
    let mut roster = Roster::default();
    let id = roster
        .add_player("  Ann Lee ", Position::GK, Some(1))
        .expect("valid name");

    let player = roster.player(&id).expect("player");
    assert_eq!(player.name, "Ann Lee");
    assert_eq!(player.position, Position::GK);
    assert_eq!(player.shirt_number, Some(1));
    assert!(!player.is_on_field);
    assert_eq!(player.field_pct, Some(Vec2::new(0.05, 0.05)));
    assert_eq!(player.playing_time, 0.0);
    assert!(roster.is_dirty());
}

#[test]
fn blank_names_are_rejected() {
    let mut roster = Roster::default();
    assert_eq!(roster.add_player("   ", Position::CM, None), None);
    assert!(roster.players().is_empty());
    assert!(!roster.is_dirty());

    let id = roster.add_player("Bea", Position::CM, None).expect("valid name");
    assert!(!roster.update_player(&id, "", Position::ST, None));
    assert_eq!(roster.player(&id).map(|p| p.name.as_str()), Some("Bea"));
}

#[test]
fn update_keeps_placement_and_time() {
    let mut roster = Roster::default();
    let id = roster.add_player("Bea", Position::CM, None).expect("valid name");
    roster.update_where(
        |p| p.id == id,
        |p| {
            p.is_on_field = true;
            p.field_pct = Some(Vec2::new(0.5, 0.5));
            p.playing_time = 30.0;
        },
    );

    assert!(roster.update_player(&id, "Beatriz", Position::LW, Some(11)));

    let player = roster.player(&id).expect("player");
    assert_eq!(player.name, "Beatriz");
    assert_eq!(player.position, Position::LW);
    assert_eq!(player.shirt_number, Some(11));
    assert!(player.is_on_field);
    assert_eq!(player.field_pct, Some(Vec2::new(0.5, 0.5)));
    assert_eq!(player.playing_time, 30.0);
}

#[test]
fn delete_removes_only_that_player() {
    let mut roster = Roster::default();
    let a = roster.add_player("Ann", Position::CM, None).expect("valid name");
    let b = roster.add_player("Bea", Position::CM, None).expect("valid name");

    assert!(roster.delete_player(&a));
    assert!(!roster.delete_player(&a));
    assert_eq!(roster.players().len(), 1);
    assert_eq!(roster.players()[0].id, b);
}

#[test]
fn formations_are_independent_snapshots() {
    let mut roster = Roster::default();
    let id = roster.add_player("Ann", Position::CM, None).expect("valid name");
    let formation = roster.save_formation("4-4-2").expect("valid name");
    assert_eq!(roster.selected_formation(), Some(formation.as_str()));

    roster.update_player(&id, "Changed", Position::ST, None);
    roster.add_player("Bea", Position::CM, None);

    let saved = &roster.formations()[0];
    assert_eq!(saved.name, "4-4-2");
    assert_eq!(saved.players.len(), 1);
    assert_eq!(saved.players[0].name, "Ann");
    assert!(saved.created_at > 0);
}

#[test]
fn loading_a_formation_resets_playing_time() {
    let mut roster = Roster::default();
    roster.add_player("Ann", Position::CM, None);
    roster.update_where(|_| true, |p| p.playing_time = 1234.0);
    let formation = roster.save_formation("Starters").expect("valid name");
    assert_eq!(roster.formations()[0].players[0].playing_time, 1234.0);

    roster.add_player("Bea", Position::CM, None);
    assert!(roster.load_formation(&formation));

    assert_eq!(roster.players().len(), 1);
    assert_eq!(roster.players()[0].playing_time, 0.0);
    // The stored snapshot itself is untouched
    assert_eq!(roster.formations()[0].players[0].playing_time, 1234.0);
    assert!(!roster.load_formation("missing"));
}

#[test]
fn deleting_the_selected_formation_clears_selection() {
    let mut roster = Roster::default();
    let first = roster.save_formation("A").expect("valid name");
    let second = roster.save_formation("B").expect("valid name");
    assert_eq!(roster.selected_formation(), Some(second.as_str()));

    assert!(roster.delete_formation(&first));
    assert_eq!(roster.selected_formation(), Some(second.as_str()));
    assert!(roster.delete_formation(&second));
    assert_eq!(roster.selected_formation(), None);
    assert!(roster.list_formations().next().is_none());
}

#[test]
fn records_use_camel_case_keys() {
    let player = Player::new("Ann", Position::CDM, Some(6));
    let json = serde_json::to_value(&player).expect("serializable");
    assert_eq!(json["name"], "Ann");
    assert_eq!(json["position"], "CDM");
    assert_eq!(json["shirtNumber"], 6);
    assert_eq!(json["isOnField"], false);
    assert_eq!(json["playingTime"], 0.0);
    assert_eq!(json["fieldPct"]["x"], 0.05);
    assert!(json.get("fieldPosition").is_none());
}

#[test]
fn board_persists_across_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");

    let (player, formation) = {
        let store = JsonDirStore::open(dir.path()).expect("store");
        let mut board = Board::new(BoardConfig::new(), store);
        let player = board
            .roster_mut()
            .add_player("Ann", Position::ST, Some(9))
            .expect("valid name");
        let formation = board
            .roster_mut()
            .save_formation("Kick-off")
            .expect("valid name");
        board.roster_mut().set_show_times(false);
        board.run_frame(0.0);
        (player, formation)
    };

    for key in [PLAYERS_KEY, FORMATIONS_KEY, SELECTED_FORMATION_KEY, SHOW_TIMES_KEY] {
        assert!(dir.path().join(format!("{}.json", key)).exists(), "{}", key);
    }

    let store = JsonDirStore::open(dir.path()).expect("store");
    let board = Board::new(BoardConfig::new(), store);
    let roster = board.roster();
    assert_eq!(roster.player(&player).map(|p| p.shirt_number), Some(Some(9)));
    assert_eq!(roster.selected_formation(), Some(formation.as_str()));
    assert!(!roster.show_times());
}

#[test]
fn playing_time_is_persisted_while_the_match_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonDirStore::open(dir.path()).expect("store");
    let mut board = Board::new(BoardConfig::new(), store);
    board.set_field_surface(Vec2::zero(), 256.0, 156.0);
    let id = board
        .roster_mut()
        .add_player("Ann", Position::CM, None)
        .expect("valid name");
    assert!(board.begin_drag(&id));
    board.end_drag(Vec2::new(50.0, 50.0), Vec2::zero());

    board.start_match(90.0);
    let mut frames = SimulatedFrames::new(0.0, 0.25);
    board.run_frames(&mut frames, 9);

    let reloaded = Roster::load(&JsonDirStore::open(dir.path()).expect("store"));
    let player = reloaded.player(&id).expect("player");
    assert!(player.is_on_field);
    assert_eq!(player.playing_time, 2.0);
}

#[test]
fn teardown_flushes_unsaved_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonDirStore::open(dir.path()).expect("store");
    let mut board = Board::new(BoardConfig::new(), store);
    board.roster_mut().add_player("Ann", Position::CM, None);
    board.teardown();

    let reloaded = Roster::load(&JsonDirStore::open(dir.path()).expect("store"));
    assert_eq!(reloaded.players().len(), 1);
}

#[test]
fn unreadable_records_fall_back_to_defaults() {
    let mut store = MemoryStore::new();
    store
        .set(PLAYERS_KEY, "[{\"id\": 12".to_string())
        .expect("memory store");
    store
        .set(SHOW_TIMES_KEY, "\"maybe\"".to_string())
        .expect("memory store");
    store
        .set(FORMATIONS_KEY, "[]".to_string())
        .expect("memory store");

    let roster = Roster::load(&store);
    assert!(roster.players().is_empty());
    assert!(roster.show_times());
    assert!(roster.formations().is_empty());
    assert_eq!(roster.selected_formation(), None);
}

#[test]
fn invalid_store_keys_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = JsonDirStore::open(dir.path()).expect("store");
    assert!(store.set("../escape", "1".to_string()).is_err());
    assert!(store.get("").is_err());
    assert_eq!(store.get("absent").expect("valid key"), None);
}

#[test]
fn legacy_pixel_positions_are_migrated_once_measured() {
    let mut store = MemoryStore::new();
    let legacy = r#"[
        {"id": "p1", "name": "Old Timer", "position": "CB", "isOnField": true,
         "fieldPosition": {"x": 100, "y": 50}, "playingTime": 42},
        {"id": "p2", "name": "Bench Warmer", "isOnField": false,
         "fieldPosition": {"x": 10, "y": 10}}
    ]"#;
    store
        .set(PLAYERS_KEY, legacy.to_string())
        .expect("memory store");

    let mut board = Board::new(BoardConfig::new(), store);
    // Not measured yet: nothing to migrate against
    board.run_frame(0.0);
    assert_eq!(board.roster().player("p1").and_then(|p| p.field_pct), None);

    board.set_field_surface(Vec2::zero(), 256.0, 156.0);
    board.run_frame(0.1);

    let p1 = board.roster().player("p1").expect("p1");
    assert_eq!(p1.field_pct, Some(Vec2::new(0.5, 0.5)));
    assert_eq!(p1.playing_time, 42.0);
    let p2 = board.roster().player("p2").expect("p2");
    assert_eq!(p2.field_pct, None);
    assert_eq!(p2.position, Position::CM);
}

#[test]
fn selecting_none_clears_only_the_selection() {
    let mut roster = Roster::default();
    let id = roster.add_player("Ann", Position::CM, None).expect("valid name");
    roster.save_formation("A").expect("valid name");
    roster.clear_dirty();

    assert!(roster.select_formation(None));
    assert_eq!(roster.selected_formation(), None);
    assert_eq!(roster.players().len(), 1);
    assert_eq!(roster.players()[0].id, id);
    assert!(roster.is_key_dirty(SELECTED_FORMATION_KEY));
    assert!(!roster.is_key_dirty(PLAYERS_KEY));
}

#[test]
fn selecting_a_formation_loads_it() {
    let mut roster = Roster::default();
    roster.add_player("Ann", Position::CM, None);
    roster.update_where(|_| true, |p| p.playing_time = 600.0);
    let formation = roster.save_formation("Starters").expect("valid name");
    roster.add_player("Bea", Position::ST, None);
    roster.select_formation(None);

    assert!(roster.select_formation(Some(&formation)));
    assert_eq!(roster.selected_formation(), Some(formation.as_str()));
    assert_eq!(roster.players().len(), 1);
    assert_eq!(roster.players()[0].name, "Ann");
    assert_eq!(roster.players()[0].playing_time, 0.0);

    assert!(!roster.select_formation(Some("missing")));
    assert_eq!(roster.selected_formation(), Some(formation.as_str()));
}

const ODD_PLAYERS: &str = r#"[
    {"id": "p1", "name": "Ann", "position": "GK", "shirtNumber": 7.5,
     "isOnField": false, "fieldPct": {"x": "left", "y": 0.2}, "playingTime": 30},
    {"id": "p2", "name": "Bea", "position": "XX", "shirtNumber": -1, "playingTime": 12}
]"#;

#[test]
fn odd_fields_do_not_cost_the_record() {
    let mut store = MemoryStore::new();
    store
        .set(PLAYERS_KEY, ODD_PLAYERS.to_string())
        .expect("memory store");

    let roster = Roster::load(&store);
    assert_eq!(roster.players().len(), 2);
    let ann = roster.player("p1").expect("p1");
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.position, Position::GK);
    assert_eq!(ann.shirt_number, None);
    assert_eq!(ann.field_pct, None);
    assert_eq!(ann.playing_time, 30.0);
    let bea = roster.player("p2").expect("p2");
    assert_eq!(bea.position, Position::CM);
    assert_eq!(bea.shirt_number, None);
    assert_eq!(bea.playing_time, 12.0);
}

#[test]
fn opening_and_closing_leaves_the_store_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let players = dir.path().join(format!("{}.json", PLAYERS_KEY));
    fs::write(&players, ODD_PLAYERS).expect("write players");

    let mut board = Board::new(
        BoardConfig::new(),
        JsonDirStore::open(dir.path()).expect("store"),
    );
    assert_eq!(board.roster().players().len(), 2);
    board.run_frame(0.0);
    board.teardown();

    assert_eq!(fs::read_to_string(&players).expect("players"), ODD_PLAYERS);
    let reloaded = Roster::load(&JsonDirStore::open(dir.path()).expect("store"));
    assert_eq!(reloaded.players().len(), 2);
    for key in [FORMATIONS_KEY, SELECTED_FORMATION_KEY, SHOW_TIMES_KEY] {
        assert!(!dir.path().join(format!("{}.json", key)).exists(), "{}", key);
    }
}

#[test]
fn unreadable_record_is_kept_until_changed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let players = dir.path().join(format!("{}.json", PLAYERS_KEY));
    fs::write(&players, "[{\"id\": 12").expect("write players");

    let mut board = Board::new(
        BoardConfig::new(),
        JsonDirStore::open(dir.path()).expect("store"),
    );
    board.roster_mut().set_show_times(false);
    board.teardown();
    assert_eq!(fs::read_to_string(&players).expect("players"), "[{\"id\": 12");

    let mut board = Board::new(
        BoardConfig::new(),
        JsonDirStore::open(dir.path()).expect("store"),
    );
    assert!(!board.roster().show_times());
    board.roster_mut().add_player("Ann", Position::CM, None);
    board.teardown();
    let reloaded = Roster::load(&JsonDirStore::open(dir.path()).expect("store"));
    assert_eq!(reloaded.players().len(), 1);
}

/// Memory store that remembers which keys were written.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    writes: Arc<Mutex<Vec<String>>>,
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.writes.lock().unwrap().push(key.to_string());
        self.inner.set(key, value)
    }
}

#[test]
fn playing_time_flushes_write_only_the_player_list() {
    let store = RecordingStore::default();
    let writes = Arc::clone(&store.writes);
    let mut board = Board::new(BoardConfig::new(), store);
    board.set_field_surface(Vec2::zero(), 256.0, 156.0);
    let id = board
        .roster_mut()
        .add_player("Ann", Position::CM, None)
        .expect("valid name");
    board.roster_mut().save_formation("Kick-off");
    assert!(board.begin_drag(&id));
    board.end_drag(Vec2::new(50.0, 50.0), Vec2::zero());
    board.run_frame(0.0);
    assert_eq!(writes.lock().unwrap().len(), 3);
    writes.lock().unwrap().clear();

    board.start_match(90.0);
    let mut frames = SimulatedFrames::new(1.0, 0.25);
    board.run_frames(&mut frames, 9);

    let writes = writes.lock().unwrap();
    assert_eq!(writes.len(), 8);
    assert!(writes.iter().all(|key| key == PLAYERS_KEY));
}
