//! Fixed-rate tick scheduling on top of variable frame times.

/// Converts frame durations into a whole number of fixed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    tick_seconds: f32,
    accumulator: f32,
    max_catch_up: u32,
}

impl FrameClock {
    /// Creates a clock running at `ticks_per_second`.
    ///
    /// At most `max_catch_up` ticks are released for a single frame; time
    /// beyond that is dropped.
    pub fn new(ticks_per_second: u32, max_catch_up: u32) -> Self {
        Self {
            tick_seconds: 1.0 / ticks_per_second.max(1) as f32,
            accumulator: 0.0,
            max_catch_up: max_catch_up.max(1),
        }
    }

    /// Seconds per tick.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_seconds
    }

    /// Feeds one frame's duration into the clock.
    ///
    /// # Returns
    ///
    /// The number of ticks due this frame.
    pub fn advance(&mut self, frame_seconds: f32) -> u32 {
        self.accumulator += frame_seconds.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.tick_seconds && due < self.max_catch_up {
            self.accumulator -= self.tick_seconds;
            due += 1;
        }

        if due == self.max_catch_up {
            self.accumulator = self.accumulator.min(self.tick_seconds);
        }

        due
    }

    /// Drops any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
