//! Cave Shooter headless entry point
//!
//! Runs a session with a simple autopilot on a simulated 100 Hz clock and
//! logs how it went. Windowed play is provided by the platform layer.
//!
//! Usage: `cave-shooter [settings.json] [max_frames]`

use glam::Vec2;

use cave_shooter::Settings;
use cave_shooter::platform::{ManualClock, Runner, ScriptedInput};
use cave_shooter::sim::{FrameInput, GameState, MoveIntent, SessionSignal, WaveEvent};

/// Simulated frame length (the game caps at 100 FPS)
const FRAME_MS: u64 = 10;
const DEFAULT_MAX_FRAMES: u64 = 100 * 60 * 3;

fn main() {
    env_logger::init();
    log::info!("Cave Shooter (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);

    log::info!("Session seed: {}", settings.seed);
    let state = GameState::new(settings);
    let mut runner = Runner::new(state, ScriptedInput::default(), ManualClock::new(0));

    let mut signal = None;
    for _ in 0..max_frames {
        let input = autopilot(&runner.state);
        let (report, frame) = runner.step_with(&input);

        if let Some(WaveEvent::Spawn { wave, count }) = report.wave_event {
            log::info!("Wave {} spawned with {} enemies", wave, count);
        }
        if report.player_hit {
            log::debug!("Player hit, health {}", frame.hud.health);
        }
        if report.signal.is_some() {
            signal = report.signal;
            break;
        }
        runner.clock.advance(FRAME_MS);
    }

    match signal {
        Some(SessionSignal::GameOver) => println!("GAME OVER"),
        Some(SessionSignal::Quit) => println!("Quit"),
        None => println!("Time limit reached"),
    }
    let state = &runner.state;
    println!(
        "Final score: {}  Wave: {}  Health: {}",
        state.score, state.wave.number, state.player.health
    );
}

/// Aim at the nearest enemy, back away from it, and keep the gun loaded
fn autopilot(state: &GameState) -> FrameInput {
    let player = &state.player;
    let camera = state.camera();
    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .total_cmp(&b.pos.distance_squared(player.pos))
    });

    let Some(enemy) = nearest else {
        return FrameInput {
            aim: state.settings.screen_size / 2.0 + Vec2::X,
            ..Default::default()
        };
    };

    let away = player.pos - enemy.pos;
    let too_close = away.length() < 250.0;
    let movement = MoveIntent {
        up: too_close && away.y < 0.0,
        down: too_close && away.y > 0.0,
        left: too_close && away.x < 0.0,
        right: too_close && away.x > 0.0,
    };

    FrameInput {
        movement,
        aim: camera.world_to_screen(enemy.pos),
        fire: true,
        reload: player.weapon.ammo == 0,
        ..Default::default()
    }
}
