//! Per-frame draw list

use glam::Vec2;

use crate::sim::{EnemyKind, GamePhase, GameState};

/// Handle the drawing layer maps to a sprite or shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Background,
    Player,
    Enemy(EnemyKind),
    Projectile,
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub visual: Visual,
    /// Center in world space
    pub world_pos: Vec2,
    /// Center in screen space (`world_pos - offset`)
    pub screen_pos: Vec2,
    pub size: Vec2,
    /// Rotation in radians
    pub facing: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub invincible: bool,
    pub wave: u32,
    pub score: u64,
    pub weapon: String,
    pub ammo: u32,
    pub clip_size: u32,
    pub reloading: bool,
    /// Countdown to the next wave while cleared
    pub next_wave_in_ms: Option<u64>,
    pub phase: GamePhase,
}

impl Hud {
    /// Health as a 0-1 fraction for the health bar
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / self.max_health as f32).min(1.0)
    }
}

/// Everything the drawing layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub offset: Vec2,
    pub viewport: Vec2,
    /// Back to front: background, agents, projectiles
    pub items: Vec<DrawItem>,
    pub hud: Hud,
}

impl RenderFrame {
    /// Build the draw list for the current state
    pub fn build(state: &GameState) -> Self {
        let camera = state.camera();
        let mut items = Vec::with_capacity(2 + state.enemies.len() + state.projectiles.len());

        let mut push = |visual, world_pos: Vec2, size: Vec2, facing| {
            items.push(DrawItem {
                visual,
                world_pos,
                screen_pos: camera.world_to_screen(world_pos),
                size,
                facing,
            });
        };

        let world = state.settings.world_size;
        push(Visual::Background, world / 2.0, world, 0.0);

        let player = &state.player;
        push(Visual::Player, player.pos, player.size, player.facing);

        for enemy in &state.enemies {
            push(Visual::Enemy(enemy.kind), enemy.pos, enemy.size, enemy.facing());
        }

        for projectile in &state.projectiles {
            let size = Vec2::splat(projectile.radius * 2.0);
            push(Visual::Projectile, projectile.pos, size, 0.0);
        }

        let weapon = &player.weapon;
        let hud = Hud {
            health: player.health,
            max_health: player.max_health,
            invincible: player.invincible,
            wave: state.wave.number,
            score: state.score,
            weapon: weapon.config.name.clone(),
            ammo: weapon.ammo,
            clip_size: weapon.config.clip_size,
            reloading: weapon.reloading,
            next_wave_in_ms: state.wave.time_until_next(state.now_ms),
            phase: state.phase,
        };

        Self {
            offset: camera.offset,
            viewport: camera.viewport,
            items,
            hud,
        }
    }

    /// Items of a given kind
    pub fn items_of(&self, visual: Visual) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| item.visual == visual)
    }
}
