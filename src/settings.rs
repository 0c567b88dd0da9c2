//! Game settings and preferences
//!
//! Persisted as JSON next to the leaderboard. Corrupt or missing files
//! fall back to defaults; the game never refuses to start over a bad
//! preferences file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::SpawnTuning;

/// Settings persistence failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Player preferences and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Name submitted to the leaderboard
    pub player_name: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Minimize flashing effects in the presentation layer
    pub reduced_motion: bool,

    // === Session ===
    /// Fixed seed for reproducible sessions; random when absent
    pub rng_seed: Option<u64>,
    /// Spawn pacing and difficulty ramps, data-driven for balance work
    pub spawn_tuning: SpawnTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "player".to_owned(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.6,
            muted: false,
            reduced_motion: false,
            rng_seed: None,
            spawn_tuning: SpawnTuning::default(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on a missing or corrupt file
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("using default settings: {err}");
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("settings saved");
        Ok(())
    }

    /// Effective cue volume after master and mute
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume after master and mute
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_volumes_compose_and_clamp() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Settings::default()
        };
        assert!((settings.effective_sfx_volume() - 0.25).abs() < 1e-6);

        let loud = Settings {
            master_volume: 2.0,
            sfx_volume: 2.0,
            ..Settings::default()
        };
        assert_eq!(loud.effective_sfx_volume(), 1.0);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("sky_pop_settings_missing.json");
        let _ = fs::remove_file(&path);
        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.player_name, "player");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = std::env::temp_dir().join("sky_pop_settings_roundtrip.json");
        let mut settings = Settings::default();
        settings.player_name = "tester".to_owned();
        settings.rng_seed = Some(7);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.player_name, "tester");
        assert_eq!(loaded.rng_seed, Some(7));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("sky_pop_settings_corrupt.json");
        fs::write(&path, "not json at all").unwrap();
        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.player_name, "player");
        let _ = fs::remove_file(&path);
    }
}
