//! Fixed-timestep accumulator.

use std::time::Duration;

/// What one rendered frame should simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    /// Fixed ticks to simulate this frame.
    pub ticks_to_run: u32,
    /// Time discarded because the tick cap was hit.
    pub dropped_backlog: Duration,
}

/// Accumulates frame time and hands out fixed-size ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_dt: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    /// Ticks at `tick_rate` per second. Zero rates and caps are raised to one.
    pub fn new(tick_rate: u32, max_frame_delta: Duration, max_ticks_per_frame: u32) -> Self {
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / tick_rate.max(1) as f64),
            max_frame_delta,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one tick.
    pub fn fixed_dt(&self) -> Duration {
        self.fixed_dt
    }

    /// Adds `frame_dt` (clamped) and returns how many ticks to run now.
    pub fn advance(&mut self, frame_dt: Duration) -> StepPlan {
        self.accumulator = self.accumulator.saturating_add(frame_dt.min(self.max_frame_delta));

        let mut ticks_to_run = 0u32;
        while self.accumulator >= self.fixed_dt && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator -= self.fixed_dt;
            ticks_to_run += 1;
        }

        let mut dropped_backlog = Duration::ZERO;
        if self.accumulator >= self.fixed_dt {
            dropped_backlog = std::mem::take(&mut self.accumulator);
        }
        StepPlan {
            ticks_to_run,
            dropped_backlog,
        }
    }
}
