//! Session state
//!
//! Everything the frame step mutates lives in `GameState`: the player, the
//! entity collections, score, waves and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Enemy, EnemyKind, Player};
use super::camera::Camera;
use super::projectile::Projectile;
use super::wave::WaveState;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health reached zero
    GameOver,
    /// Player asked to leave
    Quit,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Startup configuration
    pub settings: Settings,
    /// Spawn offsets and wander AI
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Enemies killed
    pub score: u64,
    /// Frames stepped
    pub frame: u64,
    /// Clock reading of the most recent frame
    pub now_ms: u64,
    pub player: Player,
    /// Living enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (in fire order)
    pub projectiles: Vec<Projectile>,
    pub wave: WaveState,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Start a session: place the player and spawn the first wave
    pub fn new(settings: Settings) -> Self {
        let player = Player::new(
            settings.player_start,
            settings.player_size,
            settings.player_max_health,
        );
        let wave = WaveState::new(settings.wave_base_count, settings.wave_pause_ms);
        let mut state = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            phase: GamePhase::Playing,
            score: 0,
            frame: 0,
            now_ms: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            wave,
            next_id: 1,
            settings,
        };

        let count = state.wave.count;
        state.spawn_wave(count);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn `count` enemies jittered around the player's start point.
    ///
    /// Spawns are anchored to the start point, not the player's current
    /// position.
    pub fn spawn_wave(&mut self, count: u32) {
        let kind = self.settings.enemy_kind;
        for _ in 0..count {
            self.spawn_enemy(kind);
        }
    }

    /// Spawn one enemy of `kind` near the start point
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> u32 {
        let jitter = i64::from(self.settings.spawn_jitter);
        let offset = Vec2::new(
            self.rng.random_range(-jitter..=jitter) as f32,
            self.rng.random_range(-jitter..=jitter) as f32,
        );
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(
            id,
            kind,
            self.settings.player_start + offset,
            self.settings.enemy_size,
            self.settings.enemy_speed,
            self.settings.enemy_max_health,
        ));
        id
    }

    /// Spawn a projectile from `origin` along each direction
    pub fn spawn_projectiles(&mut self, origin: Vec2, directions: &[Vec2]) {
        for &dir in directions {
            let id = self.next_entity_id();
            self.projectiles.push(Projectile::new(
                id,
                origin,
                dir,
                self.settings.projectile_speed,
                self.settings.projectile_radius,
            ));
        }
    }

    /// Camera for the player's current position
    pub fn camera(&self) -> Camera {
        Camera::follow(self.player.pos, self.settings.screen_size)
    }
}
