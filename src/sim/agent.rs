//! Player and enemy agents
//!
//! Positions are sprite centers in world space. Bounding boxes are derived
//! from position and fixed sprite extents and used for both drawing and
//! collision.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::elapsed_ms;
use super::collision::Aabb;
use super::weapon::{Weapon, WeaponConfig};
use crate::consts::{WANDER_MAX_MS, WANDER_MIN_MS};
use crate::{angle_of, normalize_or};

/// Directional movement intents for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Velocity for these intents at `speed` units/s. Diagonals are scaled by
    /// 1/√2 so every direction moves at the same speed.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let mut vel = Vec2::ZERO;
        if self.up {
            vel.y -= speed;
        }
        if self.down {
            vel.y += speed;
        }
        if self.left {
            vel.x -= speed;
        }
        if self.right {
            vel.x += speed;
        }
        let vertical = self.up || self.down;
        let horizontal = self.left || self.right;
        if vertical && horizontal {
            vel /= std::f32::consts::SQRT_2;
        }
        vel
    }
}

/// Keep a sprite of `size` centered at `pos` inside the world rectangle
pub fn clamp_to_world(pos: Vec2, size: Vec2, world: Vec2) -> Vec2 {
    let half = size / 2.0;
    let center = world / 2.0;
    // A sprite larger than the world is pinned to the world center
    pos.clamp(half.min(center), (world - half).max(center))
}

/// The player agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Facing angle in radians (cosmetic)
    pub facing: f32,
    pub health: i32,
    pub max_health: i32,
    pub invincible: bool,
    pub last_hit_ms: u64,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, max_health: i32) -> Self {
        Self {
            pos,
            size,
            facing: 0.0,
            health: max_health,
            max_health,
            invincible: false,
            last_hit_ms: 0,
            weapon: Weapon::new(WeaponConfig::assault_rifle()),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Integrate movement for one frame and clamp to the world
    pub fn apply_movement(&mut self, intent: MoveIntent, speed: f32, dt: f32, world: Vec2) {
        self.pos += intent.velocity(speed) * dt;
        self.pos = clamp_to_world(self.pos, self.size, world);
    }

    /// Face the aim target. The player is always drawn at screen center.
    pub fn face_toward(&mut self, aim_screen: Vec2, screen_size: Vec2) {
        let to_aim = aim_screen - screen_size / 2.0;
        if to_aim != Vec2::ZERO {
            self.facing = angle_of(to_aim);
        }
    }

    /// Swap in a fresh weapon. Partial reloads and cooldowns are discarded.
    pub fn equip(&mut self, config: WeaponConfig) {
        log::info!("Equipped {}", config.name);
        self.weapon = Weapon::new(config);
    }

    /// Apply contact damage unless invincible. Returns true if damage landed.
    pub fn take_contact_hit(&mut self, damage: i32, now_ms: u64) -> bool {
        if self.invincible {
            return false;
        }
        self.health = (self.health - damage).max(0);
        self.invincible = true;
        self.last_hit_ms = now_ms;
        true
    }

    /// Clear invincibility once the window has passed
    pub fn update_invincibility(&mut self, now_ms: u64, duration_ms: u64) {
        if self.invincible && elapsed_ms(now_ms, self.last_hit_ms) >= duration_ms {
            self.invincible = false;
        }
    }
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Chases the player
    #[default]
    Bug,
    /// Drifts around at random
    Zombie,
}

impl EnemyKind {
    /// Steering strategy for a freshly spawned enemy of this kind
    pub fn initial_ai(&self) -> EnemyAi {
        match self {
            EnemyKind::Bug => EnemyAi::Pursuit,
            // Picks a heading on its first update
            EnemyKind::Zombie => EnemyAi::Wander { next_change_ms: 0 },
        }
    }
}

/// Enemy steering strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyAi {
    /// Head straight for the player
    Pursuit,
    /// Keep a random heading, re-rolled after a random 0.5-2 s delay
    Wander { next_change_ms: u64 },
}

impl EnemyAi {
    /// Heading for this frame. Returns `current` when there is nothing new.
    pub fn steer<R: Rng>(
        &mut self,
        current: Vec2,
        self_pos: Vec2,
        player_pos: Vec2,
        now_ms: u64,
        rng: &mut R,
    ) -> Vec2 {
        match self {
            EnemyAi::Pursuit => normalize_or(player_pos - self_pos, current),
            EnemyAi::Wander { next_change_ms } => {
                if now_ms < *next_change_ms {
                    return current;
                }
                let roll = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
                *next_change_ms = now_ms + rng.random_range(WANDER_MIN_MS..=WANDER_MAX_MS);
                normalize_or(roll, Vec2::X)
            }
        }
    }
}

/// An enemy agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Current unit heading (zero until first steered)
    pub direction: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub ai: EnemyAi,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, size: Vec2, speed: f32, health: i32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            direction: Vec2::ZERO,
            speed,
            health,
            max_health: health,
            ai: kind.initial_ai(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Facing angle (cosmetic)
    pub fn facing(&self) -> f32 {
        angle_of(self.direction)
    }

    /// Steer, integrate and clamp to the world
    pub fn update<R: Rng>(
        &mut self,
        player_pos: Vec2,
        dt: f32,
        now_ms: u64,
        world: Vec2,
        rng: &mut R,
    ) {
        self.direction = self
            .ai
            .steer(self.direction, self.pos, player_pos, now_ms, rng);
        self.pos += self.direction * self.speed * dt;
        self.pos = clamp_to_world(self.pos, self.size, world);
    }
}
