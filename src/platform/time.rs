//! Fixed-step accumulator
//!
//! Hosts call `advance` with the real time since the previous frame and run the
//! returned number of simulation ticks.

use crate::consts::{MAX_FRAME_US, MAX_SUBSTEPS, SIM_DT_US};

#[derive(Debug, Clone)]
pub struct FixedStep {
    step_us: u64,
    accumulator_us: u64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT_US)
    }
}

impl FixedStep {
    pub fn new(step_us: u64) -> Self {
        Self {
            step_us: step_us.max(1),
            accumulator_us: 0,
        }
    }

    pub fn step_us(&self) -> u64 {
        self.step_us
    }

    /// Add frame time and return how many ticks to run now.
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks run per frame to
    /// prevent a spiral of death; leftover time carries into the next frame.
    pub fn advance(&mut self, frame_us: u64) -> u32 {
        self.accumulator_us += frame_us.min(MAX_FRAME_US);

        let mut substeps = 0;
        while self.accumulator_us >= self.step_us && substeps < MAX_SUBSTEPS {
            self.accumulator_us -= self.step_us;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a step waiting in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator_us as f32 / self.step_us as f32
    }

    pub fn reset(&mut self) {
        self.accumulator_us = 0;
    }
}
