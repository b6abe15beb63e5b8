//! Frame clocks supplying the elapsed time between ticks.

use std::time::Instant;

/// Source of per-frame elapsed time.
pub trait FrameClock {
    /// Seconds elapsed since the previous call.
    fn delta_seconds(&mut self) -> f32;
}

/// Clock that reports the same step every frame. Useful for replays and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f32,
}

impl FixedStepClock {
    /// Create a clock advancing by `step` seconds per frame.
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl FrameClock for FixedStepClock {
    fn delta_seconds(&mut self) -> f32 {
        self.step
    }
}

/// Wall clock based on [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    /// Start measuring from now.
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn delta_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}
