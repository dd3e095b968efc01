//! Projectiles
//!
//! Straight-line motion only. A projectile lives until it scrolls off the
//! visible viewport or is consumed by a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Aabb;

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Direction × speed (units per second)
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Create a projectile moving along `direction` (assumed unit length)
    pub fn new(id: u32, pos: Vec2, direction: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: direction * speed,
            radius,
        }
    }

    /// Integrate position
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Bounding box (square around the circle)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Expired once its bounds no longer touch the viewport. World bounds
    /// are ignored.
    pub fn is_expired(&self, camera: &Camera) -> bool {
        !camera.is_visible(&self.bounds())
    }
}

/// Move all projectiles and drop those that left the viewport
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, camera: &Camera, dt: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.update(dt);
    }
    projectiles.retain(|p| !p.is_expired(camera));
}
