//! Configuration module for triaxis-motion.
//!
//! The fixed machine parameters (pulse timing, encoder filtering, homing
//! procedure, pin polarity) live in [`MotionConfig`]. Every section has a
//! `Default` matching the built-in constants; with the `std` feature the same
//! structure can be loaded from TOML.

mod axis;
mod encoder;
mod homing;
#[cfg(feature = "std")]
mod loader;
mod system;
mod timing;
mod trajectory;
pub mod units;
mod validation;

pub use axis::{AxesConfig, AxisConfig};
pub use encoder::EncoderConfig;
pub use homing::HomingConfig;
pub use system::MotionConfig;
pub use timing::PulseTiming;
pub use trajectory::{TrajectoryConfig, MAX_TRAJECTORY_POINTS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
