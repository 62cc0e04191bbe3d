//! Fixed timestep accumulator
//!
//! Converts variable frame times into a whole number of fixed simulation
//! steps, carrying the remainder forward so the simulation speed does not
//! depend on the host refresh rate.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_substeps,
        }
    }

    /// Add frame time. Returns the number of fixed steps to run now.
    ///
    /// Time beyond `max_substeps` steps is discarded (spiral of death cap).
    pub fn accumulate(&mut self, frame: Duration) -> u32 {
        if self.step.is_zero() {
            log::error!("Fixed timestep has a zero step; running no steps");
            return 0;
        }
        self.accumulator += frame;
        let cap = self.step * self.max_substeps;
        if self.accumulator > cap {
            log::debug!(
                "Dropping {:?} of frame time over the substep cap",
                self.accumulator - cap
            );
            self.accumulator = cap;
        }

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }

}
