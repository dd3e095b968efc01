//! Frame step
//!
//! One fixed-order pass per frame: input, movement, weapon, projectiles,
//! collisions, waves, camera.

use glam::Vec2;

use super::agent::MoveIntent;
use super::camera::Camera;
use super::clock::FrameTime;
use super::collision::{resolve_contact_damage, resolve_projectile_hits};
use super::projectile::update_projectiles;
use super::state::{GamePhase, GameState};
use super::wave::WaveEvent;
use super::weapon::WeaponConfig;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Held movement intents
    pub movement: MoveIntent,
    /// Aim target in screen space (e.g. the pointer)
    pub aim: Vec2,
    /// Fire was pressed this frame
    pub fire: bool,
    /// Reload was pressed this frame
    pub reload: bool,
    /// Weapon slot selected this frame (1..=3)
    pub weapon_select: Option<u8>,
    /// Quit was requested this frame
    pub quit: bool,
}

/// Terminal signals raised to the surrounding application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    GameOver,
    Quit,
}

/// What happened during a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Camera for drawing this frame
    pub camera: Option<Camera>,
    /// Projectiles fired
    pub shots_fired: usize,
    /// Enemies killed
    pub kills: usize,
    /// The player took contact damage
    pub player_hit: bool,
    /// Wave scheduler event
    pub wave_event: Option<WaveEvent>,
    /// Raised once, on the frame the session ends
    pub signal: Option<SessionSignal>,
}

/// Advance the session by one frame.
///
/// Once the session has ended this is a no-op. The frame on which the
/// player dies still runs to completion (including the camera) so the
/// caller can draw it before switching to the game-over screen.
pub fn tick(state: &mut GameState, input: &FrameInput, time: FrameTime) -> FrameReport {
    let mut report = FrameReport::default();
    if state.phase.is_terminal() {
        return report;
    }

    if input.quit {
        log::info!("Quit requested (score {}, wave {})", state.score, state.wave.number);
        state.phase = GamePhase::Quit;
        report.signal = Some(SessionSignal::Quit);
        return report;
    }

    state.frame += 1;
    state.now_ms = time.now_ms;
    let now = time.now_ms;
    let dt = time.dt;
    let world = state.settings.world_size;
    let screen = state.settings.screen_size;

    // --- Movement ---
    let speed = state.settings.player_speed;
    state.player.apply_movement(input.movement, speed, dt, world);
    state.player.face_toward(input.aim, screen);

    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.update(player_pos, dt, now, world, &mut state.rng);
    }

    // Camera is a pure function of the player position, so everything after
    // movement can share it
    let camera = state.camera();

    // --- Weapon ---
    if let Some(slot) = input.weapon_select {
        if let Some(config) = WeaponConfig::for_slot(slot) {
            state.player.equip(config);
        }
    }
    state.player.weapon.update(now);
    if input.fire {
        let aim_world = camera.screen_to_world(input.aim);
        let origin = state.player.pos;
        if let Some(directions) = state.player.weapon.shoot(aim_world - origin, now) {
            report.shots_fired = directions.len();
            state.spawn_projectiles(origin, &directions);
        }
    }
    if input.reload {
        state.player.weapon.reload(now);
    }

    // --- Projectiles ---
    update_projectiles(&mut state.projectiles, &camera, dt);

    // --- Collisions ---
    let hits = resolve_projectile_hits(&mut state.enemies, &mut state.projectiles);
    report.kills = hits.killed.len();
    state.score += hits.killed.len() as u64;

    report.player_hit = resolve_contact_damage(
        &mut state.player,
        &state.enemies,
        state.settings.contact_damage,
        state.settings.invincibility_ms,
        now,
    );
    if state.player.is_dead() {
        log::info!("Game over (score {}, wave {})", state.score, state.wave.number);
        state.phase = GamePhase::GameOver;
        report.signal = Some(SessionSignal::GameOver);
    }

    // --- Waves ---
    if !state.phase.is_terminal() {
        let event = state.wave.update(state.enemies.len(), now);
        if let Some(WaveEvent::Spawn { count, .. }) = event {
            state.spawn_wave(count);
        }
        report.wave_event = event;
    }

    // --- Camera ---
    report.camera = Some(state.camera());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::agent::{Enemy, EnemyKind};
    use crate::sim::projectile::Projectile;

    const DT: f32 = 0.01;

    fn at(now_ms: u64) -> FrameTime {
        FrameTime::new(now_ms, DT)
    }

    /// Session with no enemies on the field
    fn empty_state() -> GameState {
        let mut state = GameState::new(Settings::default());
        state.enemies.clear();
        state
    }

    fn enemy_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let pos = state.player.pos;
        let mut enemy = Enemy::new(id, EnemyKind::Bug, pos, Vec2::splat(60.0), 0.0, 5);
        enemy.direction = Vec2::X;
        state.enemies.push(enemy);
    }

    #[test]
    fn test_diagonal_movement_speed() {
        let mut state = empty_state();
        state.wave.cleared_at_ms = Some(0);
        let start = state.player.pos;
        let input = FrameInput {
            movement: MoveIntent {
                down: true,
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, FrameTime::new(10, 0.1));
        let moved = state.player.pos - start;
        assert!((moved.length() - 30.0).abs() < 1e-3);
        assert!((moved.x - moved.y).abs() < 1e-4);
    }

    #[test]
    fn test_fire_spawns_projectile_toward_aim() {
        let mut state = empty_state();
        // Aim to the right of screen center
        let input = FrameInput {
            aim: Vec2::new(900.0, 500.0),
            fire: true,
            ..Default::default()
        };
        let report = tick(&mut state, &input, at(1000));
        assert_eq!(report.shots_fired, 1);
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        assert!(p.vel.x > 0.0 && p.vel.y.abs() < 1e-3);
        assert!((p.vel.length() - 500.0).abs() < 1e-2);
        assert_eq!(state.player.weapon.ammo, 23);
    }

    #[test]
    fn test_fire_with_zero_aim_uses_fallback() {
        let mut state = empty_state();
        let input = FrameInput {
            aim: Vec2::new(500.0, 500.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, at(1000));
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].vel.x > 0.0);
    }

    #[test]
    fn test_shotgun_fires_fan() {
        let mut state = empty_state();
        let input = FrameInput {
            aim: Vec2::new(900.0, 500.0),
            fire: true,
            weapon_select: Some(2),
            ..Default::default()
        };
        let report = tick(&mut state, &input, at(1000));
        assert_eq!(report.shots_fired, 7);
        assert_eq!(state.projectiles.len(), 7);
        assert_eq!(state.player.weapon.ammo, 7);
    }

    #[test]
    fn test_reload_after_fire_same_frame() {
        let mut state = empty_state();
        let input = FrameInput {
            aim: Vec2::new(900.0, 500.0),
            fire: true,
            reload: true,
            ..Default::default()
        };
        tick(&mut state, &input, at(0));
        assert!(state.player.weapon.reloading);
        tick(&mut state, &FrameInput::default(), at(2500));
        assert_eq!(state.player.weapon.ammo, 24);
    }

    #[test]
    fn test_weapon_switch_discards_reload() {
        let mut state = empty_state();
        state.player.weapon.ammo = 3;
        state.player.weapon.reload(0);
        let input = FrameInput {
            weapon_select: Some(1),
            ..Default::default()
        };
        tick(&mut state, &input, at(100));
        assert_eq!(state.player.weapon.config.name, "Handgun");
        assert!(!state.player.weapon.reloading);
        assert_eq!(state.player.weapon.ammo, 12);
    }

    #[test]
    fn test_kill_increments_score() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec2::new(300.0, 0.0);
        state
            .enemies
            .push(Enemy::new(id, EnemyKind::Bug, pos, Vec2::splat(60.0), 0.0, 1));
        let pid = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(pid, pos, Vec2::X, 0.0, 3.0));

        let report = tick(&mut state, &FrameInput::default(), at(100));

        assert_eq!(report.kills, 1);
        assert_eq!(state.score, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(report.wave_event, Some(WaveEvent::Cleared));
    }

    #[test]
    fn test_projectile_expires_off_screen() {
        let mut state = empty_state();
        state.wave.cleared_at_ms = Some(0);
        let pid = state.next_entity_id();
        // Screen spans world [100, 1100]; start just inside the right edge
        state.projectiles.push(Projectile::new(
            pid,
            Vec2::new(1095.0, 600.0),
            Vec2::X,
            500.0,
            3.0,
        ));
        tick(&mut state, &FrameInput::default(), FrameTime::new(10, 0.02));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_contact_damage_scenario() {
        let mut state = empty_state();
        enemy_on_player(&mut state);

        let report = tick(&mut state, &FrameInput::default(), at(1000));
        assert!(report.player_hit);
        assert_eq!(state.player.health, 90);
        assert!(state.player.invincible);

        let report = tick(&mut state, &FrameInput::default(), at(1500));
        assert!(!report.player_hit);
        assert_eq!(state.player.health, 90);

        let report = tick(&mut state, &FrameInput::default(), at(2500));
        assert!(report.player_hit);
        assert_eq!(state.player.health, 80);
        // Contact does not consume the enemy
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_game_over_finishes_frame() {
        let mut state = empty_state();
        state.player.health = 10;
        enemy_on_player(&mut state);

        let report = tick(&mut state, &FrameInput::default(), at(1000));
        assert_eq!(report.signal, Some(SessionSignal::GameOver));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.health, 0);
        assert!(report.camera.is_some());

        // Nothing moves after the session ends
        let frame = state.frame;
        let report = tick(&mut state, &FrameInput::default(), at(1010));
        assert_eq!(report, FrameReport::default());
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_quit_signal() {
        let mut state = empty_state();
        let input = FrameInput {
            quit: true,
            ..Default::default()
        };
        let report = tick(&mut state, &input, at(10));
        assert_eq!(report.signal, Some(SessionSignal::Quit));
        assert_eq!(state.phase, GamePhase::Quit);
    }

    #[test]
    fn test_wave_advances_after_pause() {
        let mut state = empty_state();
        let report = tick(&mut state, &FrameInput::default(), at(1000));
        assert_eq!(report.wave_event, Some(WaveEvent::Cleared));

        let report = tick(&mut state, &FrameInput::default(), at(5999));
        assert_eq!(report.wave_event, None);
        assert!(state.enemies.is_empty());

        let report = tick(&mut state, &FrameInput::default(), at(6000));
        assert_eq!(report.wave_event, Some(WaveEvent::Spawn { wave: 2, count: 8 }));
        assert_eq!(state.enemies.len(), 8);
        assert_eq!(state.wave.number, 2);
    }

    #[test]
    fn test_wave_sizes_over_four_clears() {
        let mut state = empty_state();
        state.player.pos = Vec2::new(1800.0, 1800.0);
        let mut sizes = vec![state.wave.count];
        let mut now = 0;
        for _ in 0..4 {
            state.enemies.clear();
            tick(&mut state, &FrameInput::default(), at(now));
            now += 5000;
            tick(&mut state, &FrameInput::default(), at(now));
            sizes.push(state.enemies.len() as u32);
            now += 10;
        }
        assert_eq!(sizes, vec![5, 8, 12, 18, 27]);
    }

    #[test]
    fn test_camera_reported_after_movement() {
        let mut state = empty_state();
        let input = FrameInput {
            movement: MoveIntent {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let report = tick(&mut state, &input, FrameTime::new(10, 0.1));
        let camera = report.camera.unwrap();
        assert_eq!(camera.offset, state.player.pos - Vec2::splat(500.0));
    }
}
