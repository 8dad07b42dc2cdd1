//! Motion module for triaxis-motion.
//!
//! Bresenham line interpolation across three axes: per-axis
//! [`AxisInterpolator`]s driven in lockstep by a [`MotionCoordinator`].

mod command;
mod coordinator;
mod interpolator;

pub use command::{AxisParams, MoveCommand, MovePlan};
pub use coordinator::{CoordinatorState, DebugCode, MotionCoordinator};
pub use interpolator::{AxisInterpolator, InterpolatorState};
