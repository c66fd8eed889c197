//! Simulated time source
//!
//! Drives both spawn timing and light-phase timing. Time only moves when
//! the host loop ticks the world, so pausing is simply not ticking.

/// Monotonically increasing simulated time in seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Advance by a tick's delta and return the new time
    ///
    /// Tolerant of irregular tick spacing; callers compare elapsed time,
    /// not tick counts.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        debug_assert!(delta_secs >= 0.0, "clock cannot move backwards");
        self.now += delta_secs;
        self.now
    }

    pub fn now(&self) -> f32 {
        self.now
    }
}
