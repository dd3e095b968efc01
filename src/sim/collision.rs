//! Collision detection and damage resolution
//!
//! Everything collides as axis-aligned boxes. Two passes run each frame:
//! projectiles against enemies, then enemies against the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Enemy, Player};
use super::projectile::Projectile;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Overlap test. Boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Outcome of the projectile-vs-enemy pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Projectiles consumed this frame
    pub projectiles_consumed: usize,
    /// IDs of enemies killed this frame
    pub killed: Vec<u32>,
}

/// Resolve projectile hits on enemies.
///
/// Each enemy loses one health per overlapping projectile. Every projectile
/// that overlaps any enemy is consumed, even if it hit an enemy that
/// survived. A projectile overlapping two enemies damages both. Dead enemies
/// are removed.
pub fn resolve_projectile_hits(enemies: &mut Vec<Enemy>, projectiles: &mut Vec<Projectile>) -> HitReport {
    let mut consumed = vec![false; projectiles.len()];

    for enemy in enemies.iter_mut() {
        let bounds = enemy.bounds();
        let mut hits = 0;
        for (i, projectile) in projectiles.iter().enumerate() {
            if bounds.intersects(&projectile.bounds()) {
                hits += 1;
                consumed[i] = true;
            }
        }
        if hits > 0 {
            enemy.health = (enemy.health - hits).max(0);
        }
    }

    let mut flags = consumed.iter();
    projectiles.retain(|_| !flags.next().copied().unwrap_or(false));

    let killed: Vec<u32> = enemies.iter().filter(|e| e.is_dead()).map(|e| e.id).collect();
    enemies.retain(|e| !e.is_dead());

    HitReport {
        projectiles_consumed: consumed.iter().filter(|&&c| c).count(),
        killed,
    }
}

/// Resolve enemy contact with the player.
///
/// Invincibility is expired first, then a single fixed hit is applied if any
/// enemy overlaps, no matter how many do. Enemies are left in place.
/// Returns true if damage landed.
pub fn resolve_contact_damage(
    player: &mut Player,
    enemies: &[Enemy],
    damage: i32,
    invincibility_ms: u64,
    now_ms: u64,
) -> bool {
    player.update_invincibility(now_ms, invincibility_ms);

    let bounds = player.bounds();
    let touching = enemies.iter().any(|e| e.bounds().intersects(&bounds));
    touching && player.take_contact_hit(damage, now_ms)
}
