//! Instance data for batched sprite drawing

use bytemuck::{Pod, Zeroable};

use super::frame::{DrawItem, RenderFrame, Visual};
use crate::sim::EnemyKind;

/// One screen-space quad, ready to upload as an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    /// Center in screen pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub rotation: f32,
    pub color: [f32; 4],
}

impl Instance {
    pub fn from_item(item: &DrawItem) -> Self {
        Self {
            position: item.screen_pos.to_array(),
            size: item.size.to_array(),
            rotation: item.facing,
            color: color_for(item.visual),
        }
    }
}

/// Placeholder tint for each visual when no sprite is bound
pub fn color_for(visual: Visual) -> [f32; 4] {
    match visual {
        Visual::Background => colors::GROUND,
        Visual::Player => colors::PLAYER,
        Visual::Enemy(EnemyKind::Bug) => colors::BUG,
        Visual::Enemy(EnemyKind::Zombie) => colors::ZOMBIE,
        Visual::Projectile => colors::PROJECTILE,
    }
}

/// Instances for every item in the frame, back to front
pub fn build_instances(frame: &RenderFrame) -> Vec<Instance> {
    frame.items.iter().map(Instance::from_item).collect()
}

/// Raw bytes for a GPU upload
pub fn as_bytes(instances: &[Instance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Colors for game elements
pub mod colors {
    pub const GROUND: [f32; 4] = [0.22, 0.2, 0.18, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const BUG: [f32; 4] = [0.6, 0.3, 0.1, 1.0];
    pub const ZOMBIE: [f32; 4] = [0.4, 0.6, 0.3, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 0.0, 0.0, 1.0]; // Red rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::GameState;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<Instance>(), 9 * 4);
    }

    #[test]
    fn test_instances_match_items() {
        let state = GameState::new(Settings::default());
        let frame = RenderFrame::build(&state);
        let instances = build_instances(&frame);
        assert_eq!(instances.len(), frame.items.len());
        assert_eq!(instances[1].position, [500.0, 500.0]);
        assert_eq!(instances[1].color, colors::PLAYER);
        assert_eq!(as_bytes(&instances).len(), instances.len() * 36);
    }
}
