//! Tick inputs and outputs.

use crate::axis::{Direction, PerAxis};
use crate::motion::DebugCode;
use crate::step::LimitSwitches;

/// Raw input levels of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisInputs {
    /// Min/max limit switch levels.
    pub limits: LimitSwitches,
    /// Encoder channel A.
    pub encoder_a: bool,
    /// Encoder channel B.
    pub encoder_b: bool,
}

/// Everything sampled at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemInputs {
    /// Global enable.
    pub enable: bool,
    /// Per-axis levels.
    pub axes: PerAxis<AxisInputs>,
}

impl SystemInputs {
    /// Enabled, switches released, encoders at rest.
    pub fn enabled() -> Self {
        Self {
            enable: true,
            axes: PerAxis::default(),
        }
    }

    /// Same inputs with every limit level replaced.
    pub fn with_limits(mut self, limits: PerAxis<LimitSwitches>) -> Self {
        for (axis, inputs) in self.axes.iter_mut() {
            inputs.limits = limits[axis];
        }
        self
    }
}

/// Per-axis outputs of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisOutputs {
    /// STEP level.
    pub step: bool,
    /// Latched direction (logical, before pin inversion).
    pub direction: Direction,
    /// Driver enable (logical, before pin inversion).
    pub enable: bool,
    /// Encoder position.
    pub position: i32,
    /// Encoder velocity over the last window.
    pub velocity: i32,
    /// Sticky encoder sequence error.
    pub encoder_error: bool,
    /// Step dropped at a limit.
    pub fault: bool,
    /// Axis homed.
    pub axis_homed: bool,
    /// Commanded position minus encoder position.
    pub following_error: i64,
}

/// Outputs of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemOutputs {
    /// Per-axis outputs.
    pub axes: PerAxis<AxisOutputs>,
    /// A move is in progress.
    pub busy: bool,
    /// OR of the per-axis limit faults.
    pub fault: bool,
    /// Coordinator state code.
    pub debug_code: DebugCode,
    /// Every axis homed.
    pub all_axes_homed: bool,
    /// Inverted `all_axes_homed`, for an active-low indicator.
    pub not_homed_indicator: bool,
}

impl Default for SystemOutputs {
    fn default() -> Self {
        Self {
            axes: PerAxis::default(),
            busy: false,
            fault: false,
            debug_code: DebugCode::Idle,
            all_axes_homed: false,
            not_homed_indicator: true,
        }
    }
}
