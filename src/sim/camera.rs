//! Camera tracking
//!
//! The camera is a pure function of the player's position: it is rebuilt
//! every frame and never carries state between frames.

use glam::Vec2;

use super::collision::Aabb;

/// World-to-screen transform centered on the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Subtract from a world position to get its screen position
    pub offset: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    /// Center the view on `target` (1:1 tracking, no clamping or lag)
    pub fn follow(target: Vec2, viewport: Vec2) -> Self {
        Self {
            offset: target - viewport / 2.0,
            viewport,
        }
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }

    /// Visible rectangle in screen space
    pub fn screen_rect(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, self.viewport)
    }

    /// Whether a world-space box is at least partly on screen
    pub fn is_visible(&self, bounds: &Aabb) -> bool {
        bounds.translated(-self.offset).intersects(&self.screen_rect())
    }
}
