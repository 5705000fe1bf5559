use std::time::{Duration, Instant};

use crate::settings::DEFAULT_MAX_FRAME_DELTA;

/// Frame timer on the host side of the core.
///
/// `tick` measures wall-clock time; `advance` feeds a synthetic delta (tests,
/// fixed-step replays). Both clamp the delta to `max_delta`.
pub struct FrameClock {
    last_update: Instant,
    max_delta: Duration,
    /// Clamped time since the previous tick
    pub delta: Duration,
    /// Sum of clamped deltas
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(max_delta_seconds: f32) -> Self {
        let max_delta_seconds = if max_delta_seconds.is_finite() {
            max_delta_seconds.max(0.0)
        } else {
            DEFAULT_MAX_FRAME_DELTA
        };
        Self {
            last_update: Instant::now(),
            max_delta: Duration::from_secs_f32(max_delta_seconds),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now - self.last_update;
        self.last_update = now;
        self.advance(raw)
    }

    pub fn advance(&mut self, raw: Duration) -> f32 {
        if raw > self.max_delta {
            log::debug!("frame delta {:.3}s clamped to {:.3}s", raw.as_secs_f32(), self.max_delta.as_secs_f32());
        }
        self.delta = raw.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }
}
