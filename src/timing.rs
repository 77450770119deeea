//! Frame pacing for the game loop.

use std::time::{Duration, Instant};

/// Fixed-rate clock deciding when the game advances by one frame.
///
/// The loop keeps polling for input between frames; this structure only answers whether the next
/// frame is due and how long the input poll may block before it is.
pub(crate) struct FrameClock {
    /// Time between two frames.
    pub(crate) interval: Duration,
    /// Timestamp of the last frame that was let through.
    pub(crate) last_update_time: Instant,
}

impl FrameClock {
    /// Creates a clock ticking `fps` times per second.
    ///
    /// A rate of zero is treated as one frame per second.
    pub(crate) fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            last_update_time: Instant::now(),
        }
    }

    /// Restarts the wait for the next frame from now.
    pub(crate) fn reset(&mut self) {
        self.last_update_time = Instant::now();
    }

    /// Returns `true` and starts a new frame if the interval has elapsed.
    pub(crate) fn tick(&mut self) -> bool {
        if self.last_update_time.elapsed() >= self.interval {
            self.last_update_time = Instant::now();
            return true;
        }

        false
    }

    /// Time left until the next frame is due, zero if it already is.
    pub(crate) fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.last_update_time.elapsed())
    }
}
