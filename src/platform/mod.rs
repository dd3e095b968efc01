//! Platform abstraction layer
//!
//! Boundaries between the simulation and whatever hosts it:
//! - Input: per-frame intents and events
//! - Time: monotonic millisecond clock
//!
//! Windowing, drawing and audio live on the other side of these traits.

use std::collections::VecDeque;
use std::time::Instant;

use crate::renderer::RenderFrame;
use crate::sim::{FrameClock, FrameInput, FrameReport, GameState, tick};

/// Source of per-frame input
pub trait InputSource {
    /// Input gathered since the previous frame
    fn poll(&mut self) -> FrameInput;
}

/// Monotonic millisecond clock
pub trait ClockSource {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockSource for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock advanced by hand (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self { now_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl ClockSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Binds a session to its input and clock
pub struct Runner<I, C> {
    pub state: GameState,
    pub input: I,
    pub clock: C,
    frame_clock: FrameClock,
}

impl<I: InputSource, C: ClockSource> Runner<I, C> {
    pub fn new(state: GameState, input: I, clock: C) -> Self {
        let frame_clock = FrameClock::new(state.settings.max_frame_dt);
        Self {
            state,
            input,
            clock,
            frame_clock,
        }
    }

    /// Poll input and time, step the simulation, and build the draw list
    pub fn step(&mut self) -> (FrameReport, RenderFrame) {
        let input = self.input.poll();
        self.step_with(&input)
    }

    /// Step with `input` instead of polling the input source
    pub fn step_with(&mut self, input: &FrameInput) -> (FrameReport, RenderFrame) {
        let time = self.frame_clock.advance(self.clock.now_ms());
        let report = tick(&mut self.state, input, time);
        let frame = RenderFrame::build(&self.state);
        (report, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, SessionSignal};

    #[test]
    fn test_scripted_input_then_idle() {
        let mut input = ScriptedInput::new([FrameInput {
            fire: true,
            ..Default::default()
        }]);
        assert!(input.poll().fire);
        assert!(input.is_exhausted());
        assert!(!input.poll().fire);
    }

    #[test]
    fn test_runner_steps_with_manual_clock() {
        let state = GameState::new(Settings::default());
        let input = ScriptedInput::new([
            FrameInput::default(),
            FrameInput {
                quit: true,
                ..Default::default()
            },
        ]);
        let mut runner = Runner::new(state, input, ManualClock::new(0));

        let (report, frame) = runner.step();
        assert!(report.signal.is_none());
        assert_eq!(frame.hud.phase, GamePhase::Playing);

        runner.clock.advance(10);
        let (report, frame) = runner.step();
        assert_eq!(report.signal, Some(SessionSignal::Quit));
        assert_eq!(frame.hud.phase, GamePhase::Quit);
    }

    #[test]
    fn test_step_with_bypasses_input_source() {
        let mut state = GameState::new(Settings::default());
        state.enemies.clear();
        let mut runner = Runner::new(state, ScriptedInput::default(), ManualClock::new(0));

        let fire = FrameInput {
            fire: true,
            ..Default::default()
        };
        let (report, frame) = runner.step_with(&fire);
        assert_eq!(report.shots_fired, 1);
        assert_eq!(frame.hud.ammo, 23);
        assert_eq!(runner.state.projectiles.len(), 1);
        assert!(runner.input.is_exhausted());
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
