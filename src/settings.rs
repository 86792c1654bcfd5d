//! Game settings and preferences
//!
//! Stored as a JSON document next to the high score. Every field has a
//! default, so a partial or older file still loads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::BASE_ENEMIES_PER_WAVE;
use crate::error::{GameError, GameResult};
use crate::sim::SimConfig;

pub use crate::sim::AimMode;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How the player turret is aimed
    pub aim_mode: AimMode,
    /// Enemies in a wave before the per-wave increase
    pub base_enemies_per_wave: u32,
    /// Fixed RNG seed; `None` picks a fresh one per run
    pub seed: Option<u64>,
    /// Where the best score is persisted
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aim_mode: AimMode::Keyboard,
            base_enemies_per_wave: BASE_ENEMIES_PER_WAVE,
            seed: None,
            high_score_path: PathBuf::from("tank_arena_highscore.json"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| GameError::io_at(path, e))?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("Using default settings: {}", err);
            Self::default()
        })
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| GameError::io_at(path, e))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Simulation knobs derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            aim_mode: self.aim_mode,
            base_enemies_per_wave: self.base_enemies_per_wave,
        }
    }

    /// The configured seed, or a fresh one from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tank-arena-settings-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"aim_mode":"pointer"}"#).unwrap();
        assert_eq!(settings.aim_mode, AimMode::Pointer);
        assert_eq!(settings.base_enemies_per_wave, BASE_ENEMIES_PER_WAVE);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_file("roundtrip");
        let settings = Settings {
            seed: Some(99),
            base_enemies_per_wave: 5,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let path = temp_file("bad");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Json(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_sim_config_and_seed() {
        let settings = Settings {
            aim_mode: AimMode::Pointer,
            seed: Some(7),
            ..Default::default()
        };
        let config = settings.sim_config();
        assert_eq!(config.aim_mode, AimMode::Pointer);
        assert_eq!(config.base_enemies_per_wave, BASE_ENEMIES_PER_WAVE);
        assert_eq!(settings.resolve_seed(), 7);
    }
}
