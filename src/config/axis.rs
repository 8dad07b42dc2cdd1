//! Per-axis output polarity.

use serde::Deserialize;

use crate::axis::PerAxis;

/// Pin polarity for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Invert DIR pin logic.
    pub invert_direction: bool,

    /// Drive ENABLE low to enable the driver.
    pub invert_enable: bool,
}

/// The `[axes.x]`, `[axes.y]` and `[axes.z]` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// X axis pins.
    pub x: AxisConfig,
    /// Y axis pins.
    pub y: AxisConfig,
    /// Z axis pins.
    pub z: AxisConfig,
}

impl AxesConfig {
    /// Index the tables by axis.
    pub fn per_axis(&self) -> PerAxis<AxisConfig> {
        PerAxis::new(self.x, self.y, self.z)
    }
}
