//! Limit-switch homing.
//!
//! Each [`AxisHomingController`] runs seek, debounce, release, offset and
//! zero for one axis. The [`HomingSequencer`] runs them one after another in
//! a fixed order after a post-reset delay.

mod controller;
mod sequencer;
mod state;

pub use controller::{AxisHomingController, HomingOutputs};
pub use sequencer::{HomingSequencer, SequencerOutputs};
pub use state::HomingState;
