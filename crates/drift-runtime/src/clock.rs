//! Frame clock with delta clamping

use std::time::Instant;

/// Tracks frame time and hands out clamped deltas
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds, after clamping
    pub delta_time: f64,
    /// Largest delta ever handed out (default: 250ms)
    pub max_delta: f64,
    /// Instant of the previous measurement
    last_instant: Instant,
    /// Whether nothing has been measured yet
    first_measure: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            last_instant: Instant::now(),
            first_measure: true,
        }
    }
}

impl FrameClock {
    /// Create a new clock with a 250ms delta clamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom delta clamp
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta: max_delta.max(0.0),
            ..Self::default()
        }
    }

    /// Raw seconds since the previous measurement, without advancing the
    /// clock. The first measurement is always 0.
    pub fn measure(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_measure {
            self.first_measure = false;
            self.last_instant = now;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        elapsed
    }

    /// Advance the clock by an explicit amount (headless runs, tests)
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        self.delta_time = self.clamp(elapsed);
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Clamp a raw delta into `[0, max_delta]`; NaN becomes 0
    pub fn clamp(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() {
            0.0
        } else {
            elapsed.clamp(0.0, self.max_delta)
        }
    }
}
