//! Three-axis motion coordinator.
//!
//! Turns a relative [`MoveCommand`] into per-axis interpolation parameters,
//! starts all three interpolators on the same tick and reports when the
//! line is finished.

use crate::axis::{Axis, Direction, PerAxis};
use crate::error::{MotionError, Result};

use super::command::{MoveCommand, MovePlan};
use super::interpolator::AxisInterpolator;

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoordinatorState {
    /// Waiting for `move_start`.
    #[default]
    Idle,
    /// Deriving deltas, directions and the major axis.
    CalcParams,
    /// Starting all interpolators.
    StartMovement,
    /// Interpolators running.
    Moving,
    /// Line finished or aborted; back to `Idle` on the next tick.
    Done,
}

/// Two-bit state code exposed on the debug outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DebugCode {
    /// Idle.
    Idle = 0,
    /// Computing parameters.
    CalcParams = 1,
    /// Starting or moving.
    Moving = 2,
    /// Done.
    Done = 3,
}

impl DebugCode {
    /// Raw code value.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<CoordinatorState> for DebugCode {
    fn from(state: CoordinatorState) -> Self {
        match state {
            CoordinatorState::Idle => DebugCode::Idle,
            CoordinatorState::CalcParams => DebugCode::CalcParams,
            CoordinatorState::StartMovement | CoordinatorState::Moving => DebugCode::Moving,
            CoordinatorState::Done => DebugCode::Done,
        }
    }
}

/// Drives three [`AxisInterpolator`]s through one line per command.
#[derive(Debug, Clone, Default)]
pub struct MotionCoordinator {
    state: CoordinatorState,
    command: MoveCommand,
    plan: MovePlan,
    axes: PerAxis<AxisInterpolator>,
    abort_pending: bool,
    last_aborted: bool,
    moves_completed: u32,
}

impl MotionCoordinator {
    /// Create an idle coordinator with all axes at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a move. Parameters are derived on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Busy`] unless the coordinator is idle.
    pub fn move_start(&mut self, command: MoveCommand) -> Result<()> {
        if self.state != CoordinatorState::Idle {
            return Err(MotionError::Busy.into());
        }

        debug!(
            "move accepted: x={} y={} z={} period={}",
            command.target_x,
            command.target_y,
            command.target_z,
            command.step_period
        );
        self.command = command;
        self.last_aborted = false;
        self.state = CoordinatorState::CalcParams;
        Ok(())
    }

    /// Request an abort. On the next tick every interpolator halts at once.
    ///
    /// Ignored unless a move is in progress.
    pub fn move_abort(&mut self) {
        if self.is_active() {
            self.abort_pending = true;
        }
    }

    /// Advance one scheduler tick.
    ///
    /// Returns the step requests issued by each axis this tick.
    pub fn tick(&mut self) -> PerAxis<Option<Direction>> {
        let mut requests = PerAxis::splat(None);

        if core::mem::take(&mut self.abort_pending) {
            for (_, interp) in self.axes.iter_mut() {
                interp.abort();
            }
            warn!("move aborted");
            self.last_aborted = true;
            self.state = CoordinatorState::Done;
            return requests;
        }

        match self.state {
            CoordinatorState::Idle => {}
            CoordinatorState::CalcParams => {
                self.plan = self.command.plan();
                self.state = CoordinatorState::StartMovement;
            }
            CoordinatorState::StartMovement => {
                let period = self.command.step_period;
                for (axis, interp) in self.axes.iter_mut() {
                    interp.start(self.plan.axes[axis], period);
                }
                trace!(
                    "move started: major={} delta={}",
                    self.plan.major_axis,
                    self.plan.delta_major
                );
                self.state = CoordinatorState::Moving;
            }
            CoordinatorState::Moving => {
                // Interpolators first, then aggregate their busy flags.
                for (axis, interp) in self.axes.iter_mut() {
                    requests[axis] = interp.tick();
                }
                if !self.axes_busy() {
                    self.moves_completed = self.moves_completed.wrapping_add(1);
                    debug!("move complete");
                    self.state = CoordinatorState::Done;
                }
            }
            CoordinatorState::Done => {
                for (_, interp) in self.axes.iter_mut() {
                    interp.tick();
                }
                self.state = CoordinatorState::Idle;
            }
        }

        requests
    }

    fn is_active(&self) -> bool {
        matches!(
            self.state,
            CoordinatorState::CalcParams
                | CoordinatorState::StartMovement
                | CoordinatorState::Moving
        )
    }

    /// OR of the interpolators' busy flags.
    #[inline]
    pub fn axes_busy(&self) -> bool {
        self.axes.0.iter().any(AxisInterpolator::busy)
    }

    /// True from `move_start` until the line is finished or aborted.
    #[inline]
    pub fn busy(&self) -> bool {
        self.is_active() || self.axes_busy()
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// State code for the debug outputs.
    #[inline]
    pub fn debug_code(&self) -> DebugCode {
        self.state.into()
    }

    /// Parameters of the current or last move.
    #[inline]
    pub fn plan(&self) -> &MovePlan {
        &self.plan
    }

    /// Interpolator of one axis.
    #[inline]
    pub fn interpolator(&self, axis: Axis) -> &AxisInterpolator {
        &self.axes[axis]
    }

    /// Commanded positions of all axes.
    pub fn commanded_positions(&self) -> PerAxis<i64> {
        PerAxis::from_fn(|axis| self.axes[axis].position())
    }

    /// Overwrite the commanded position of one axis.
    pub fn set_position(&mut self, axis: Axis, position: i64) {
        self.axes[axis].set_position(position);
    }

    /// True if the last move ended by abort.
    #[inline]
    pub fn last_move_aborted(&self) -> bool {
        self.last_aborted
    }

    /// Number of moves that ran to completion.
    #[inline]
    pub fn moves_completed(&self) -> u32 {
        self.moves_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Run a move to completion, returning per-axis step counts and ticks taken.
    fn run(coord: &mut MotionCoordinator, command: MoveCommand) -> (PerAxis<u32>, u32) {
        coord.move_start(command).unwrap();
        let mut steps = PerAxis::splat(0u32);
        let mut ticks = 0;
        while coord.busy() {
            let requests = coord.tick();
            for (axis, request) in requests.iter() {
                if request.is_some() {
                    steps[axis] += 1;
                }
            }
            ticks += 1;
            assert!(ticks < 1_000_000);
        }
        // Done -> Idle
        coord.tick();
        (steps, ticks)
    }

    #[test]
    fn test_state_sequence() {
        let mut coord = MotionCoordinator::new();
        coord.move_start(MoveCommand::new(2, 1, 0, 1)).unwrap();
        assert_eq!(coord.state(), CoordinatorState::CalcParams);
        assert_eq!(coord.debug_code(), DebugCode::CalcParams);

        coord.tick();
        assert_eq!(coord.state(), CoordinatorState::StartMovement);
        assert_eq!(coord.plan().major_axis, Axis::X);

        coord.tick();
        assert_eq!(coord.state(), CoordinatorState::Moving);
        assert_eq!(coord.debug_code().code(), 2);
        assert!(coord.axes_busy());
    }

    #[test]
    fn test_three_axis_line() {
        let mut coord = MotionCoordinator::new();
        let (steps, _) = run(&mut coord, MoveCommand::new(120, -45, 80, 2));
        assert_eq!(steps, PerAxis::new(120, 45, 80));
        assert_eq!(coord.commanded_positions(), PerAxis::new(120, -45, 80));
        assert_eq!(coord.moves_completed(), 1);
        assert_eq!(coord.state(), CoordinatorState::Idle);
    }

    #[test]
    fn test_zero_move_completes_without_steps() {
        let mut coord = MotionCoordinator::new();
        coord.move_start(MoveCommand::new(0, 0, 0, 10)).unwrap();
        coord.tick();
        coord.tick();
        assert_eq!(coord.state(), CoordinatorState::Moving);

        let requests = coord.tick();
        assert_eq!(requests, PerAxis::splat(None));
        assert_eq!(coord.state(), CoordinatorState::Done);

        // The following move is unaffected.
        coord.tick();
        let (steps, _) = run(&mut coord, MoveCommand::new(0, 7, 0, 1));
        assert_eq!(steps, PerAxis::new(0, 7, 0));
    }

    #[test]
    fn test_busy_rejects_second_move() {
        let mut coord = MotionCoordinator::new();
        coord.move_start(MoveCommand::new(10, 0, 0, 1)).unwrap();
        assert_eq!(
            coord.move_start(MoveCommand::new(1, 0, 0, 1)),
            Err(Error::Motion(MotionError::Busy))
        );
    }

    #[test]
    fn test_abort_halts_all_axes_next_tick() {
        let mut coord = MotionCoordinator::new();
        coord.move_start(MoveCommand::new(100, 100, 50, 1)).unwrap();
        for _ in 0..12 {
            coord.tick();
        }
        let before = coord.commanded_positions();

        coord.move_abort();
        assert_eq!(coord.tick(), PerAxis::splat(None));
        assert!(!coord.busy());
        assert!(coord.last_move_aborted());
        assert_eq!(coord.state(), CoordinatorState::Done);

        for _ in 0..20 {
            assert_eq!(coord.tick(), PerAxis::splat(None));
        }
        assert_eq!(coord.commanded_positions(), before);
        assert_eq!(coord.moves_completed(), 0);
    }

    #[test]
    fn test_abort_while_idle_is_ignored() {
        let mut coord = MotionCoordinator::new();
        coord.move_abort();
        coord.tick();
        assert_eq!(coord.state(), CoordinatorState::Idle);
        assert!(!coord.last_move_aborted());
    }

    #[test]
    fn test_abort_while_idle_does_not_carry_over() {
        let mut coord = MotionCoordinator::new();
        run(&mut coord, MoveCommand::new(3, 0, 0, 1));
        assert_eq!(coord.state(), CoordinatorState::Idle);

        // No tick in between: the next move must not inherit the abort.
        coord.move_abort();
        let (steps, _) = run(&mut coord, MoveCommand::new(5, 0, 0, 1));
        assert_eq!(steps, PerAxis::new(5, 0, 0));
        assert!(!coord.last_move_aborted());
        assert_eq!(coord.moves_completed(), 2);
    }

    #[test]
    fn test_round_trip_returns_to_origin() {
        let mut coord = MotionCoordinator::new();
        run(&mut coord, MoveCommand::new(0, 0, 333, 1));
        run(&mut coord, MoveCommand::new(0, 0, -333, 1));
        assert_eq!(coord.commanded_positions(), PerAxis::splat(0));
    }
}
