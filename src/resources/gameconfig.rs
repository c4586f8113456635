//! Engine configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and a method to load the file; missing values
//! keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! target_fps = 60
//! time_scale = 1.0
//! frames = 600
//!
//! [map]
//! tileset = assets/tiles.cfg
//! initial = assets/maps/meadow.map
//! dir = assets/maps
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_TILESET_PATH: &str = "./assets/tiles.cfg";
const DEFAULT_MAP_PATH: &str = "./assets/maps/meadow.map";
const DEFAULT_MAP_DIR: &str = "./assets/maps";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Simulation ticks per second; the fixed frame delta is its inverse.
    pub target_fps: u32,
    /// Multiplier applied to the frame delta.
    pub time_scale: f32,
    /// Number of frames the headless driver runs before exiting.
    pub frames: u32,
    /// Path to the tile-set definition file.
    pub tileset_path: PathBuf,
    /// Path to the initial map file.
    pub initial_map: PathBuf,
    /// Directory `NEXTMAP` names are resolved against.
    pub map_dir: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            time_scale: DEFAULT_TIME_SCALE,
            frames: DEFAULT_FRAMES,
            tileset_path: PathBuf::from(DEFAULT_TILESET_PATH),
            initial_map: PathBuf::from(DEFAULT_MAP_PATH),
            map_dir: PathBuf::from(DEFAULT_MAP_DIR),
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
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [simulation] section
        if let Some(fps) = config.getuint("simulation", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(scale) = config.getfloat("simulation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(frames) = config.getuint("simulation", "frames").ok().flatten() {
            self.frames = frames as u32;
        }

        // [map] section
        if let Some(tileset) = config.get("map", "tileset") {
            self.tileset_path = PathBuf::from(tileset);
        }
        if let Some(initial) = config.get("map", "initial") {
            self.initial_map = PathBuf::from(initial);
        }
        if let Some(dir) = config.get("map", "dir") {
            self.map_dir = PathBuf::from(dir);
        }

        info!(
            "Loaded config: fps={}, time_scale={}, frames={}, map={:?}",
            self.target_fps, self.time_scale, self.frames, self.initial_map
        );

        Ok(())
    }
}
