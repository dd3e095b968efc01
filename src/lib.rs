//! Cave Shooter - simulation core for a top-down wave shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (movement, weapons, collisions, waves)
//! - `renderer`: Render sink description handed to the drawing layer
//! - `platform`: Input and clock boundaries
//! - `settings`: Startup configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport size (pixels)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;

    /// Default world size (units)
    pub const WORLD_WIDTH: f32 = 2000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (600.0, 600.0);
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_SIZE: (f32, f32) = (70.0, 70.0);

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 80.0;
    pub const ENEMY_MAX_HEALTH: i32 = 5;
    pub const ENEMY_SIZE: (f32, f32) = (60.0, 60.0);

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;

    /// Contact damage dealt by an enemy touching the player
    pub const CONTACT_DAMAGE: i32 = 10;
    /// Damage immunity after a contact hit (ms)
    pub const INVINCIBILITY_MS: u64 = 1000;

    /// Wave progression
    pub const WAVE_BASE_COUNT: u32 = 5;
    pub const WAVE_PAUSE_MS: u64 = 5000;
    /// Spawn offset range around the player's start point (inclusive)
    pub const SPAWN_JITTER: u32 = 100;

    /// Wander AI re-targets after a random delay in this range (ms)
    pub const WANDER_MIN_MS: u64 = 500;
    pub const WANDER_MAX_MS: u64 = 2000;
}

/// Normalize `v`, or return `fallback` when `v` has zero length
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of `v` in radians (screen space: +y is down)
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
