//! Startup configuration
//!
//! Viewport/world geometry and gameplay tuning, loaded from JSON. Every field
//! has a default that reproduces the stock game.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::EnemyKind;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Viewport size in pixels
    pub screen_size: Vec2,
    /// World size in units
    pub world_size: Vec2,

    // === Player ===
    pub player_start: Vec2,
    /// Units per second along a single axis
    pub player_speed: f32,
    pub player_max_health: i32,
    pub player_size: Vec2,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_max_health: i32,
    pub enemy_size: Vec2,
    /// Archetype spawned by the wave scheduler
    pub enemy_kind: EnemyKind,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,

    // === Damage ===
    pub contact_damage: i32,
    pub invincibility_ms: u64,

    // === Waves ===
    pub wave_base_count: u32,
    pub wave_pause_ms: u64,
    /// Max spawn offset from the start point on each axis
    pub spawn_jitter: u32,

    // === Timing ===
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,

    /// RNG seed for spawn offsets and wander AI
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),

            player_start: Vec2::from(PLAYER_START),
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            player_size: Vec2::from(PLAYER_SIZE),

            enemy_speed: ENEMY_SPEED,
            enemy_max_health: ENEMY_MAX_HEALTH,
            enemy_size: Vec2::from(ENEMY_SIZE),
            enemy_kind: EnemyKind::Bug,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,

            contact_damage: CONTACT_DAMAGE,
            invincibility_ms: INVINCIBILITY_MS,

            wave_base_count: WAVE_BASE_COUNT,
            wave_pause_ms: WAVE_PAUSE_MS,
            spawn_jitter: SPAWN_JITTER,

            max_frame_dt: MAX_FRAME_DT,

            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_size.min_element() <= 0.0 {
            return Err(SettingsError::Invalid("screen size must be positive".into()));
        }
        if self.world_size.min_element() <= 0.0 {
            return Err(SettingsError::Invalid("world size must be positive".into()));
        }
        if self.world_size.cmplt(self.screen_size).any() {
            return Err(SettingsError::Invalid(
                "world must be at least as large as the screen".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_game() {
        let s = Settings::default();
        assert_eq!(s.screen_size, Vec2::new(1000.0, 1000.0));
        assert_eq!(s.world_size, Vec2::new(2000.0, 2000.0));
        assert_eq!(s.wave_base_count, 5);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "player_speed": 150.0, "seed": 7 }"#).unwrap();
        assert_eq!(s.player_speed, 150.0);
        assert_eq!(s.seed, 7);
        assert_eq!(s.enemy_max_health, ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_invalid_world_rejected() {
        let err = Settings::from_json(r#"{ "world_size": [500.0, 500.0] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_negative_jitter_is_parse_error() {
        let err = Settings::from_json(r#"{ "spawn_jitter": -5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load_or_default("/nonexistent/cave-shooter.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings::default();
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
