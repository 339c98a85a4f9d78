//! Roster and formation store.
//!
//! [`Roster`] is the single shared table of players the drag controller and
//! the playing-time accumulator both write to, together with the saved
//! formations and the two small UI preferences that are persisted alongside
//! them. Every mutation goes through [`Roster::apply`], which builds a new
//! list from the old one, so an update either lands completely or not at all.
//!
//! Records serialize with camelCase keys so stored data stays compatible with
//! boards saved by earlier versions of the app.

use bevy_ecs::prelude::Resource;
use chrono::Utc;
use log::{debug, info};
use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::math::Vec2;
use crate::resources::fieldgeometry::to_normalized;
use crate::resources::kvstore::{KeyValueStore, StoreError, load_or_default, save_value};

/// Storage keys, one per independently persisted record.
pub const PLAYERS_KEY: &str = "stm_players";
pub const FORMATIONS_KEY: &str = "stm_formations";
pub const SELECTED_FORMATION_KEY: &str = "stm_selectedFormation";
pub const SHOW_TIMES_KEY: &str = "stm_showTimes";

/// Every persisted key, in write order.
pub const PERSISTED_KEYS: [&str; 4] = [
    PLAYERS_KEY,
    FORMATIONS_KEY,
    SELECTED_FORMATION_KEY,
    SHOW_TIMES_KEY,
];

/// Normalized position recorded for a freshly added bench player.
const NEW_PLAYER_POSITION: Vec2 = Vec2::new(0.05, 0.05);

/// Field position codes a player can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    GK,
    CB,
    LB,
    RB,
    CDM,
    #[default]
    CM,
    CAM,
    RM,
    LM,
    RW,
    LW,
    ST,
}

impl Position {
    pub const ALL: [Position; 12] = [
        Position::GK,
        Position::CB,
        Position::LB,
        Position::RB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::RM,
        Position::LM,
        Position::RW,
        Position::LW,
        Position::ST,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::CB => "CB",
            Position::LB => "LB",
            Position::RB => "RB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::RM => "RM",
            Position::LM => "LM",
            Position::RW => "RW",
            Position::LW => "LW",
            Position::ST => "ST",
        }
    }

    /// Parse a position code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Position> {
        Position::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Read any JSON value; one that does not fit `T` reads as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// One roster entry.
///
/// `field_pct` is the normalized position and only means something while
/// `is_on_field` is set. `field_position` is the absolute pixel position older
/// boards stored instead; it is read once by the legacy migration and then
/// ignored.
///
/// Only `id` is required when reading. A field holding a value of the wrong
/// shape (a fractional or negative shirt number, a position without numeric
/// coordinates, an unknown position code) reads as absent, so one odd field
/// never costs the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub position: Position,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub shirt_number: Option<u32>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub is_on_field: bool,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_pct: Option<Vec2>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_position: Option<Vec2>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub playing_time: f64,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, shirt_number: Option<u32>) -> Self {
        Player {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            position,
            shirt_number,
            is_on_field: false,
            field_pct: Some(NEW_PLAYER_POSITION),
            field_position: None,
            playing_time: 0.0,
        }
    }

    /// Normalized position, `(0, 0)` when none has been recorded yet.
    pub fn normalized(&self) -> Vec2 {
        self.field_pct.unwrap_or_default()
    }
}

/// A named, independent snapshot of the whole roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub created_at: i64,
    #[serde(default)]
    pub players: Vec<Player>,
}

/// The live roster plus saved formations and persisted preferences.
///
/// Each mutation marks the storage keys it touched; only those are written
/// back. A key that was unreadable at load time is therefore left alone in
/// the store until the record it holds is changed in this session.
#[derive(Resource, Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    formations: Vec<Formation>,
    selected_formation: Option<String>,
    show_times: bool,
    dirty: FxHashSet<&'static str>,
}

impl Default for Roster {
    fn default() -> Self {
        Roster {
            players: Vec::new(),
            formations: Vec::new(),
            selected_formation: None,
            show_times: true,
            dirty: FxHashSet::default(),
        }
    }
}

impl Roster {
    /// Build a new list where every entry matching `predicate` is replaced by
    /// `transform` applied to a copy of it. Non-matching entries are cloned as-is.
    pub fn apply<P, T>(list: &[Player], predicate: P, transform: T) -> Vec<Player>
    where
        P: Fn(&Player) -> bool,
        T: Fn(&mut Player),
    {
        list.iter()
            .map(|p| {
                let mut p = p.clone();
                if predicate(&p) {
                    transform(&mut p);
                }
                p
            })
            .collect()
    }

    /// Read all four records, falling back to defaults for anything missing
    /// or unreadable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Roster {
            players: load_or_default(store, PLAYERS_KEY, Vec::new()),
            formations: load_or_default(store, FORMATIONS_KEY, Vec::new()),
            selected_formation: load_or_default(store, SELECTED_FORMATION_KEY, None),
            show_times: load_or_default(store, SHOW_TIMES_KEY, true),
            dirty: FxHashSet::default(),
        }
    }

    /// Write every changed record and forget it was changed. Returns how many
    /// keys were written; on error the failing key and any after it stay
    /// pending.
    pub fn save_changes(&mut self, store: &mut dyn KeyValueStore) -> Result<usize, StoreError> {
        let mut written = 0;
        for key in PERSISTED_KEYS {
            if !self.dirty.contains(key) {
                continue;
            }
            match key {
                PLAYERS_KEY => save_value(store, key, &self.players)?,
                FORMATIONS_KEY => save_value(store, key, &self.formations)?,
                SELECTED_FORMATION_KEY => save_value(store, key, &self.selected_formation)?,
                _ => save_value(store, key, &self.show_times)?,
            }
            self.dirty.remove(key);
            written += 1;
        }
        Ok(written)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    pub fn list_formations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.formations
            .iter()
            .map(|f| (f.id.as_str(), f.name.as_str()))
    }

    pub fn selected_formation(&self) -> Option<&str> {
        self.selected_formation.as_deref()
    }

    pub fn show_times(&self) -> bool {
        self.show_times
    }

    pub fn on_field_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_on_field).count()
    }

    pub fn bench_count(&self) -> usize {
        self.players.len() - self.on_field_count()
    }

    /// True when any record has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_key_dirty(&self, key: &str) -> bool {
        self.dirty.contains(key)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    fn mark(&mut self, key: &'static str) {
        self.dirty.insert(key);
    }

    /// Replace the entries matching `predicate` in one step.
    pub fn update_where<P, T>(&mut self, predicate: P, transform: T)
    where
        P: Fn(&Player) -> bool,
        T: Fn(&mut Player),
    {
        self.players = Roster::apply(&self.players, predicate, transform);
        self.mark(PLAYERS_KEY);
    }

    /// Add a bench player. Returns the new id, or `None` for an empty name.
    pub fn add_player(
        &mut self,
        name: &str,
        position: Position,
        shirt_number: Option<u32>,
    ) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let player = Player::new(name, position, shirt_number);
        let id = player.id.clone();
        debug!("Added player {} ({})", name, id);
        self.players.push(player);
        self.mark(PLAYERS_KEY);
        Some(id)
    }

    /// Edit a player's identity fields. Placement and time are untouched.
    pub fn update_player(
        &mut self,
        id: &str,
        name: &str,
        position: Position,
        shirt_number: Option<u32>,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() || self.player(id).is_none() {
            return false;
        }
        self.update_where(
            |p| p.id == id,
            |p| {
                p.name = name.to_string();
                p.position = position;
                p.shirt_number = shirt_number;
            },
        );
        true
    }

    pub fn delete_player(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        let removed = self.players.len() != before;
        if removed {
            self.mark(PLAYERS_KEY);
        }
        removed
    }

    /// Snapshot the live roster under `name` and select it.
    pub fn save_formation(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let formation = Formation {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now().timestamp_millis(),
            players: self.players.clone(),
        };
        let id = formation.id.clone();
        info!("Saved formation '{}' with {} players", name, formation.players.len());
        self.formations.push(formation);
        self.selected_formation = Some(id.clone());
        self.mark(FORMATIONS_KEY);
        self.mark(SELECTED_FORMATION_KEY);
        Some(id)
    }

    /// Replace the live roster with a saved snapshot. Every loaded player
    /// starts with zero playing time.
    pub fn load_formation(&mut self, id: &str) -> bool {
        let Some(formation) = self.formations.iter().find(|f| f.id == id) else {
            return false;
        };
        info!("Loaded formation: {}", formation.name);
        self.players = Roster::apply(&formation.players, |_| true, |p| p.playing_time = 0.0);
        self.selected_formation = Some(id.to_string());
        self.mark(PLAYERS_KEY);
        self.mark(SELECTED_FORMATION_KEY);
        true
    }

    /// Change the selection; `Some(id)` also loads that formation.
    pub fn select_formation(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) => self.load_formation(id),
            None => {
                self.selected_formation = None;
                self.mark(SELECTED_FORMATION_KEY);
                true
            }
        }
    }

    pub fn delete_formation(&mut self, id: &str) -> bool {
        let before = self.formations.len();
        self.formations.retain(|f| f.id != id);
        if self.formations.len() == before {
            return false;
        }
        if self.selected_formation.as_deref() == Some(id) {
            self.selected_formation = None;
            self.mark(SELECTED_FORMATION_KEY);
        }
        self.mark(FORMATIONS_KEY);
        true
    }

    pub fn set_show_times(&mut self, show: bool) {
        self.show_times = show;
        self.mark(SHOW_TIMES_KEY);
    }

    pub fn toggle_show_times(&mut self) -> bool {
        self.set_show_times(!self.show_times);
        self.show_times
    }

    /// Give on-field players that only carry a pixel position a normalized one,
    /// measured against the current active play area. Returns how many were
    /// converted.
    pub fn migrate_legacy_positions(&mut self, area_width: f64, area_height: f64) -> usize {
        let needs_migration = |p: &Player| p.is_on_field && p.field_pct.is_none();
        let count = self.players.iter().filter(|&p| needs_migration(p)).count();
        if count == 0 {
            return 0;
        }
        self.update_where(needs_migration, |p| {
            let px = p.field_position.unwrap_or_default();
            p.field_pct = Some(to_normalized(px.x, px.y, area_width, area_height));
        });
        count
    }
}
