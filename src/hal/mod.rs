//! embedded-hal 1.0 pin wiring for one axis.
//!
//! [`StepDirPins`] writes the STEP/DIR/ENABLE outputs of a tick to GPIO, and
//! [`SensorPins`] samples the limit switches and encoder channels into
//! [`AxisInputs`](crate::system::AxisInputs).

mod pins;

pub use pins::{AxisPins, SensorPins, StepDirPins};
