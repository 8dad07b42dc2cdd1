//! The whole motion core behind one tick.
//!
//! [`MotionSystem`] owns the coordinator, the homing sequencer, and one pulse
//! generator and quadrature decoder per axis. Each call to
//! [`MotionSystem::tick`] advances all of them once using the signals
//! registered on the previous tick.

mod builder;
mod io;
mod scheduler;

pub use builder::MotionSystemBuilder;
pub use io::{AxisInputs, AxisOutputs, SystemInputs, SystemOutputs};
pub use scheduler::MotionSystem;
