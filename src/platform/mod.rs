//! Platform abstraction layer
//!
//! Glue between a host (browser, terminal, headless driver) and the simulation:
//! - Input events collapsed into per-tick held state
//! - Frame time converted into fixed simulation ticks

pub mod input;
pub mod time;

pub use input::{Action, InputSampler, KeyEvent};
pub use time::FixedStep;
