//! Frame timing
//!
//! The simulation never reads a clock directly. The platform supplies a
//! monotonic millisecond counter once per frame and `FrameClock` turns it
//! into the `FrameTime` handed to `tick`.

use serde::{Deserialize, Serialize};

/// Timing for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Monotonic time in milliseconds
    pub now_ms: u64,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now_ms: u64, dt: f32) -> Self {
        Self { now_ms, dt }
    }
}

/// Milliseconds elapsed since `since`, saturating at zero
#[inline]
pub fn elapsed_ms(now_ms: u64, since: u64) -> u64 {
    now_ms.saturating_sub(since)
}

/// Converts successive clock readings into frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<u64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Advance to `now_ms` and return this frame's timing.
    ///
    /// The first reading yields `dt = 0`. Readings that go backwards are
    /// treated as no time passing.
    pub fn advance(&mut self, now_ms: u64) -> FrameTime {
        let dt = match self.last_ms {
            Some(last) => (elapsed_ms(now_ms, last) as f32 / 1000.0).min(self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        FrameTime { now_ms, dt }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut clock = FrameClock::new(0.1);
        let t = clock.advance(1234);
        assert_eq!(t.now_ms, 1234);
        assert_eq!(t.dt, 0.0);
    }

    #[test]
    fn test_dt_in_seconds() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(1000);
        let t = clock.advance(1010);
        assert!((t.dt - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_large_gap_clamped() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0);
        let t = clock.advance(5000);
        assert_eq!(t.dt, 0.1);
        assert_eq!(t.now_ms, 5000);
    }

    #[test]
    fn test_backwards_reading_is_zero_dt() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(500);
        assert_eq!(clock.advance(400).dt, 0.0);
        // Next delta is still measured from the latest reading
        let t = clock.advance(520);
        assert!((t.dt - 0.02).abs() < 1e-6);
    }
}
