//! Board configuration resource.
//!
//! Manages board settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [field]
//! dot_size = 56
//! aspect = 0.65
//! snap_to_grid = false
//! grid_cols = 8
//! grid_rows = 10
//!
//! [timers]
//! batch_seconds = 0.25
//! default_minutes = 90
//!
//! [store]
//! dir = ./board-data
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::fieldgeometry::DEFAULT_DOT_SIZE;
use crate::resources::matchclock::DEFAULT_MATCH_MINUTES;
use crate::resources::playtime::DEFAULT_BATCH_SECONDS;

/// Default safe values for startup
const DEFAULT_FIELD_ASPECT: f64 = 0.65;
const DEFAULT_SNAP_TO_GRID: bool = false;
const DEFAULT_GRID_COLS: u32 = 8;
const DEFAULT_GRID_ROWS: u32 = 10;
const DEFAULT_STORE_DIR: &str = "./board-data";
const DEFAULT_CONFIG_PATH: &str = "./formationboard.ini";

/// Board configuration resource.
///
/// Stores field layout, timer batching and storage settings. The values are
/// read once when a [`Board`](crate::board::Board) is built; changing the
/// resource afterwards does not re-layout an existing session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Token diameter in pixels.
    pub dot_size: f64,
    /// Width / height of the field background image.
    pub field_aspect: f64,
    /// Snap dropped tokens to the grid intersections.
    pub snap_to_grid: bool,
    pub grid_cols: u32,
    pub grid_rows: u32,
    /// Accumulated seconds that trigger a playing-time flush.
    pub batch_seconds: f64,
    /// Match length offered when none is given.
    pub default_minutes: f64,
    /// Directory of the JSON key-value store.
    pub store_dir: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            dot_size: DEFAULT_DOT_SIZE,
            field_aspect: DEFAULT_FIELD_ASPECT,
            snap_to_grid: DEFAULT_SNAP_TO_GRID,
            grid_cols: DEFAULT_GRID_COLS,
            grid_rows: DEFAULT_GRID_ROWS,
            batch_seconds: DEFAULT_BATCH_SECONDS,
            default_minutes: DEFAULT_MATCH_MINUTES,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or non-positive values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [field] section
        if let Some(dot) = config.getfloat("field", "dot_size").ok().flatten() {
            if dot >= 0.0 {
                self.dot_size = dot;
            }
        }
        if let Some(aspect) = config.getfloat("field", "aspect").ok().flatten() {
            if aspect > 0.0 {
                self.field_aspect = aspect;
            }
        }
        if let Some(snap) = config.getbool("field", "snap_to_grid").ok().flatten() {
            self.snap_to_grid = snap;
        }
        if let Some(cols) = config.getuint("field", "grid_cols").ok().flatten() {
            if cols > 0 {
                self.grid_cols = cols as u32;
            }
        }
        if let Some(rows) = config.getuint("field", "grid_rows").ok().flatten() {
            if rows > 0 {
                self.grid_rows = rows as u32;
            }
        }

        // [timers] section
        if let Some(batch) = config.getfloat("timers", "batch_seconds").ok().flatten() {
            if batch > 0.0 {
                self.batch_seconds = batch;
            }
        }
        if let Some(minutes) = config.getfloat("timers", "default_minutes").ok().flatten() {
            if minutes > 0.0 {
                self.default_minutes = minutes;
            }
        }

        // [store] section
        if let Some(dir) = config.get("store", "dir") {
            self.store_dir = PathBuf::from(dir);
        }

        info!(
            "Loaded config: dot={}, aspect={}, grid={}x{} (snap={}), batch={}s, default={}min, store={:?}",
            self.dot_size,
            self.field_aspect,
            self.grid_cols,
            self.grid_rows,
            self.snap_to_grid,
            self.batch_seconds,
            self.default_minutes,
            self.store_dir
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [field] section
        config.set("field", "dot_size", Some(self.dot_size.to_string()));
        config.set("field", "aspect", Some(self.field_aspect.to_string()));
        config.set("field", "snap_to_grid", Some(self.snap_to_grid.to_string()));
        config.set("field", "grid_cols", Some(self.grid_cols.to_string()));
        config.set("field", "grid_rows", Some(self.grid_rows.to_string()));

        // [timers] section
        config.set("timers", "batch_seconds", Some(self.batch_seconds.to_string()));
        config.set("timers", "default_minutes", Some(self.default_minutes.to_string()));

        // [store] section
        config.set("store", "dir", Some(self.store_dir.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Grid dimensions when snapping is enabled.
    pub fn grid(&self) -> Option<(u32, u32)> {
        self.snap_to_grid.then_some((self.grid_cols, self.grid_rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_keeps_defaults() {
        let mut config = BoardConfig::with_path("/nonexistent/formationboard.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.dot_size, 56.0);
        assert_eq!(config.grid(), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.ini");
        let mut config = BoardConfig::with_path(&path);
        config.dot_size = 40.0;
        config.snap_to_grid = true;
        config.grid_cols = 4;
        config.batch_seconds = 0.5;
        config.save_to_file().unwrap();

        let mut loaded = BoardConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.dot_size, 40.0);
        assert_eq!(loaded.grid(), Some((4, 10)));
        assert_eq!(loaded.batch_seconds, 0.5);
    }
}
