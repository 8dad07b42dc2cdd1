//! Relative move commands and the parameters derived from them.

use crate::axis::{Axis, Direction, PerAxis};

/// A relative three-axis move.
///
/// Displacements are in steps. `step_period` is the number of scheduler
/// ticks between major-axis steps and is not divided at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveCommand {
    /// Relative X displacement in steps.
    pub target_x: i32,
    /// Relative Y displacement in steps.
    pub target_y: i32,
    /// Relative Z displacement in steps.
    pub target_z: i32,
    /// Ticks between major-axis steps.
    pub step_period: u16,
}

/// Interpolation parameters for one axis of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisParams {
    /// Step count of the major axis (shared by all three axes).
    pub delta_major: u32,
    /// Step count of this axis.
    pub delta_minor: u32,
    /// This axis is the major axis.
    pub is_major: bool,
    /// Travel direction of this axis.
    pub direction: Direction,
}

/// Derived parameters for a whole move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovePlan {
    /// Largest absolute displacement.
    pub delta_major: u32,
    /// Axis carrying `delta_major`.
    pub major_axis: Axis,
    /// Per-axis parameters.
    pub axes: PerAxis<AxisParams>,
}

impl MoveCommand {
    /// Create a move command.
    #[inline]
    pub const fn new(target_x: i32, target_y: i32, target_z: i32, step_period: u16) -> Self {
        Self {
            target_x,
            target_y,
            target_z,
            step_period,
        }
    }

    /// Relative displacement per axis.
    #[inline]
    pub fn targets(&self) -> PerAxis<i32> {
        PerAxis::new(self.target_x, self.target_y, self.target_z)
    }

    /// Derive deltas, directions and the major axis.
    ///
    /// Ties go to the axis that comes first in X, Y, Z order.
    pub fn plan(&self) -> MovePlan {
        let targets = self.targets();
        let deltas = targets.map(|_, t| t.unsigned_abs());

        let mut major_axis = Axis::X;
        for axis in [Axis::Y, Axis::Z] {
            if deltas[axis] > deltas[major_axis] {
                major_axis = axis;
            }
        }
        let delta_major = deltas[major_axis];

        let axes = PerAxis::from_fn(|axis| AxisParams {
            delta_major,
            delta_minor: deltas[axis],
            is_major: axis == major_axis,
            direction: Direction::from_steps(targets[axis] as i64),
        });

        MovePlan {
            delta_major,
            major_axis,
            axes,
        }
    }
}
