//! Wave progression
//!
//! A wave is cleared when the last enemy dies. After a fixed pause the next
//! wave spawns with 1.5x as many enemies, rounded up.

use serde::{Deserialize, Serialize};

use super::clock::elapsed_ms;

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    /// Enemies remain
    InWave,
    /// All enemies dead, waiting out the pause
    Cleared { since_ms: u64 },
}

/// What the scheduler wants done this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEvent {
    /// The last enemy of the wave just died
    Cleared,
    /// Spawn `count` enemies for wave `wave`
    Spawn { wave: u32, count: u32 },
}

/// Enemy count for the wave after one with `count` enemies: ceil(count * 1.5).
///
/// Saturates at `u32::MAX` instead of overflowing.
#[inline]
pub fn next_wave_count(count: u32) -> u32 {
    let next = (u64::from(count) * 3).div_ceil(2);
    u32::try_from(next).unwrap_or(u32::MAX)
}

/// Wave bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    /// Current wave (1-based)
    pub number: u32,
    /// Enemies spawned for the current wave
    pub count: u32,
    /// Set when the wave was cleared, cleared again when the next spawns
    pub cleared_at_ms: Option<u64>,
    pub pause_ms: u64,
}

impl WaveState {
    pub fn new(base_count: u32, pause_ms: u64) -> Self {
        Self {
            number: 1,
            count: base_count,
            cleared_at_ms: None,
            pause_ms,
        }
    }

    pub fn phase(&self) -> WavePhase {
        match self.cleared_at_ms {
            Some(since_ms) => WavePhase::Cleared { since_ms },
            None => WavePhase::InWave,
        }
    }

    /// Advance the scheduler given the number of living enemies.
    ///
    /// The clear timestamp is recorded only on the frame the wave empties.
    /// Once the pause has elapsed the wave number and size advance and a
    /// `Spawn` event is returned; the caller must spawn exactly `count`.
    pub fn update(&mut self, enemies_alive: usize, now_ms: u64) -> Option<WaveEvent> {
        if enemies_alive > 0 {
            return None;
        }
        match self.cleared_at_ms {
            None => {
                self.cleared_at_ms = Some(now_ms);
                log::debug!("Wave {} cleared", self.number);
                Some(WaveEvent::Cleared)
            }
            Some(since) if elapsed_ms(now_ms, since) >= self.pause_ms => {
                self.number += 1;
                self.count = next_wave_count(self.count);
                self.cleared_at_ms = None;
                log::info!("Wave {} incoming ({} enemies)", self.number, self.count);
                Some(WaveEvent::Spawn {
                    wave: self.number,
                    count: self.count,
                })
            }
            Some(_) => None,
        }
    }

    /// Milliseconds until the next wave spawns, if cleared
    pub fn time_until_next(&self, now_ms: u64) -> Option<u64> {
        self.cleared_at_ms
            .map(|since| self.pause_ms.saturating_sub(elapsed_ms(now_ms, since)))
    }
}
