//! STEP/DIR pulse generation with limit-switch interlock.

mod generator;
mod limits;

pub use generator::{PulseOutputs, PulseState, StepPulseGenerator};
pub use limits::{LimitFilter, LimitSwitches};
