//! # triaxis-motion
//!
//! Three-axis motion core for step/dir stepper drivers, advanced one
//! scheduler tick at a time.
//!
//! ## Features
//!
//! - **Bresenham lines**: the major axis steps every `step_period` ticks and
//!   minor axes are spread evenly, with exact step counts
//! - **STEP/DIR timing**: fixed setup, pulse and hold phases per step, with a
//!   limit-switch interlock
//! - **Quadrature feedback**: filtered A/B decoding with sequence error
//!   detection and windowed velocity
//! - **Homing**: debounced limit-switch seek, release, offset and zero, run
//!   as an ordered cascade over the axes
//! - **no_std compatible**: no allocation, every buffer is fixed-size
//! - **embedded-hal 1.0**: pin adapters for driver outputs and sensor inputs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use triaxis_motion::{MotionSystem, MoveCommand, SystemInputs};
//!
//! let config = triaxis_motion::load_config("machine.toml")?;
//! let mut system = MotionSystem::builder().from_config(config).build()?;
//!
//! // Call once per scheduler tick.
//! let outputs = system.tick(&inputs);
//!
//! if system.ready() {
//!     system.start_move(MoveCommand::new(1200, -400, 0, 25))?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod config;
pub mod encoder;
pub mod error;
pub mod hal;
pub mod homing;
pub mod motion;
pub mod step;
pub mod system;
pub mod trajectory;

// Re-exports for ergonomic API
pub use axis::{Axis, Direction, PerAxis};
pub use config::{validate_config, MotionConfig};
pub use error::{Error, Result};
pub use motion::{MotionCoordinator, MoveCommand};
pub use system::{MotionSystem, MotionSystemBuilder, SystemInputs, SystemOutputs};
pub use trajectory::{PositionTable, TrajectoryReader};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
