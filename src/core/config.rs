//! Application settings.
//!
//! `Settings` is the configuration provider for the engine: player count,
//! starting life, negative-life permission, turn timer, and notification
//! toggles. It is persisted in the key-value store with the rest of the
//! session and can also be loaded from a TOML file in the platform config
//! directory.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, read_to_string, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::player::{LIFE_MAX, MAX_PLAYERS};
use crate::error::Result;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Turn length used when the configured duration is zero.
pub const DEFAULT_TURN_TIMER_SECONDS: u32 = 240;

const CONFIG_DIR: &str = "LifeCounter";
const CONFIG_FILE: &str = "Config.toml";

/// Settings consumed by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Seats taking turns (2-6).
    pub player_count: usize,
    pub starting_life_total: i32,
    pub custom_starting_life_total: i32,
    /// Upper bound for the custom random number roll. 0 disables it.
    pub custom_random_number: u32,
    pub allow_negative_life: bool,
    pub turn_timer_enabled: bool,
    /// Seconds per turn.
    pub turn_timer_duration: u32,
    pub turn_timer_sound: bool,
    pub haptics_enabled: bool,
    pub sounds_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_life_total: 40,
            custom_starting_life_total: 60,
            custom_random_number: 0,
            allow_negative_life: false,
            turn_timer_enabled: false,
            turn_timer_duration: DEFAULT_TURN_TIMER_SECONDS,
            turn_timer_sound: false,
            haptics_enabled: true,
            sounds_enabled: true,
        }
    }
}

impl Settings {
    /// Set the player count, clamped to 2-6.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.set_player_count(count);
        self
    }

    /// Set the starting life total, clamped to 1-9999.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.set_starting_life_total(life);
        self
    }

    /// Permit or forbid negative life globally.
    #[must_use]
    pub fn with_negative_life(mut self, allowed: bool) -> Self {
        self.allow_negative_life = allowed;
        self
    }

    /// Enable the per-turn countdown.
    #[must_use]
    pub fn with_turn_timer(mut self, seconds: u32) -> Self {
        self.turn_timer_enabled = true;
        self.turn_timer_duration = seconds;
        self
    }

    pub fn set_player_count(&mut self, count: usize) {
        self.player_count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
    }

    pub fn set_starting_life_total(&mut self, life: i32) {
        self.starting_life_total = life.clamp(1, LIFE_MAX);
    }

    pub fn set_custom_starting_life_total(&mut self, life: i32) {
        self.custom_starting_life_total = life.clamp(1, LIFE_MAX);
    }

    /// Turn timer length, falling back to the default when unset.
    #[must_use]
    pub fn turn_timer_seconds(&self) -> u32 {
        if self.turn_timer_duration == 0 {
            DEFAULT_TURN_TIMER_SECONDS
        } else {
            self.turn_timer_duration
        }
    }

    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Render settings as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Default settings file location, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().map(|base| base.config_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load settings from a file, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let source = read_to_string(path)?;
            return Self::from_toml_str(&source);
        }
        Ok(Self::default())
    }

    /// Write settings to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let source = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                create_dir_all(parent)?;
            }
        }
        let mut file = File::create(path)?;
        file.write_all(source.as_bytes())?;
        Ok(())
    }
}
