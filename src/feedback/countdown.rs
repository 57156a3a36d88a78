//! Fixed-length display windows

use std::time::Duration;

/// A window that opens at `started_at` and closes `length` later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at: Duration,
    length: Duration,
}

impl Countdown {
    pub fn new(started_at: Duration, length: Duration) -> Self {
        Self { started_at, length }
    }

    pub fn deadline(&self) -> Duration {
        self.started_at.saturating_add(self.length)
    }

    /// Whether the window is still open at `now`
    pub fn is_active(&self, now: Duration) -> bool {
        now < self.deadline()
    }

    /// Fraction of the window already elapsed, 0.0 - 1.0
    pub fn progress(&self, now: Duration) -> f32 {
        if self.length.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.length.as_secs_f32()).clamp(0.0, 1.0)
    }
}
