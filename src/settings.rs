//! Player preferences
//!
//! Read-only at runtime: loaded once from a JSON document in storage and
//! never written back by the game.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::persistence::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Death cue volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Visual Effects ===
    /// Translucent halo around paddle, bricks and ball
    pub neon_glow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.12,
            sfx_volume: 0.12,
            muted: false,
            neon_glow: true,
        }
    }
}

impl Settings {
    /// Storage key of the settings document
    pub const STORAGE_KEY: &'static str = "neonBreakoutSettings";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Load from storage, falling back to defaults
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings document: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    /// Effective sfx volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_partial_document_and_clamping() {
        let settings = Settings::from_json(r#"{ "music_volume": 3.0, "neon_glow": false }"#).unwrap();
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.12);
        assert!(!settings.neon_glow);
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let storage = MemoryStorage::with_value(Settings::STORAGE_KEY, "{ nope");
        assert_eq!(Settings::load(&storage), Settings::default());
        assert_eq!(Settings::load(&MemoryStorage::new()), Settings::default());
    }

    #[test]
    fn test_mute_zeroes_volumes() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_music_volume(), 0.0);
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }
}
