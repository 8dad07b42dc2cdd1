//! Homing procedure for a single axis.

use crate::axis::{Axis, Direction};
use crate::config::HomingConfig;
use crate::step::LimitSwitches;

use super::state::HomingState;

/// Outputs of one homing tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HomingOutputs {
    /// Step to hand to the pulse generator this tick.
    pub step_request: Option<Direction>,
    /// Set for the single tick in which the axis position is zeroed.
    pub zero_position: bool,
    /// Axis has completed homing.
    pub axis_homed: bool,
}

/// Drives one axis onto its minimum limit switch and establishes zero.
///
/// The hit is debounced; the release is not. After the switch releases the
/// axis moves exactly `offset_steps` further and the position is set to 0
/// from the step count alone.
///
/// `limits` are taken as given. [`MotionSystem`](crate::system::MotionSystem)
/// hands over the glitch-filtered levels.
#[derive(Debug, Clone)]
pub struct AxisHomingController {
    axis: Axis,
    step_period: u32,
    debounce_ticks: u32,
    offset_steps: u32,

    state: HomingState,
    timer: u32,
    debounce: u32,
    step_count: u32,
    position: i64,
    steps_issued: u32,
    ticks_in_state: u32,
}

impl AxisHomingController {
    /// Create an idle controller.
    pub fn new(axis: Axis, config: &HomingConfig) -> Self {
        Self {
            axis,
            step_period: config.step_period,
            debounce_ticks: config.debounce_ticks,
            offset_steps: config.offset_steps,
            state: HomingState::Idle,
            timer: 0,
            debounce: 0,
            step_count: 0,
            position: 0,
            steps_issued: 0,
            ticks_in_state: 0,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self, enable_homing: bool, limits: LimitSwitches) -> HomingOutputs {
        let mut out = HomingOutputs::default();
        self.ticks_in_state = self.ticks_in_state.saturating_add(1);
        let hit = limits.min_triggered();

        match self.state {
            HomingState::Idle => {
                if enable_homing {
                    self.transition(HomingState::Homing);
                }
            }
            HomingState::Homing => {
                if hit {
                    self.debounce = 0;
                    self.transition(HomingState::DebounceHit);
                } else if self.period_elapsed() {
                    out.step_request = self.emit(Direction::Negative);
                }
            }
            HomingState::DebounceHit => {
                if !hit {
                    self.transition(HomingState::Homing);
                } else {
                    self.debounce += 1;
                    if self.debounce >= self.debounce_ticks {
                        self.transition(HomingState::Release);
                    }
                }
            }
            HomingState::Release => {
                if !hit {
                    self.step_count = 0;
                    self.transition(HomingState::Offset);
                } else if self.period_elapsed() {
                    out.step_request = self.emit(Direction::Positive);
                }
            }
            HomingState::Offset => {
                if self.period_elapsed() {
                    if self.step_count < self.offset_steps {
                        self.step_count += 1;
                        out.step_request = self.emit(Direction::Positive);
                    } else {
                        self.transition(HomingState::SetZero);
                    }
                }
            }
            HomingState::SetZero => {
                self.position = 0;
                out.zero_position = true;
                self.transition(HomingState::Complete);
                info!("axis {} homed", self.axis);
            }
            HomingState::Complete => {}
        }

        out.axis_homed = self.state == HomingState::Complete;
        out
    }

    fn transition(&mut self, next: HomingState) {
        debug!(
            "homing {}: {} -> {}",
            self.axis.name(),
            self.state.name(),
            next.name()
        );
        self.state = next;
        self.timer = 0;
        self.ticks_in_state = 0;
    }

    // Free-running step timer; true once per `step_period` ticks.
    fn period_elapsed(&mut self) -> bool {
        if self.timer < self.step_period.saturating_sub(1) {
            self.timer += 1;
            false
        } else {
            self.timer = 0;
            true
        }
    }

    fn emit(&mut self, direction: Direction) -> Option<Direction> {
        self.position += direction.sign();
        self.steps_issued = self.steps_issued.wrapping_add(1);
        Some(direction)
    }

    /// Axis this controller homes.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> HomingState {
        self.state
    }

    /// Homing complete.
    #[inline]
    pub fn axis_homed(&self) -> bool {
        self.state == HomingState::Complete
    }

    /// Steps issued in the offset phase.
    #[inline]
    pub fn offset_count(&self) -> u32 {
        self.step_count
    }

    /// Open-loop position from issued steps; 0 once homed.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Total steps issued.
    #[inline]
    pub fn steps_issued(&self) -> u32 {
        self.steps_issued
    }

    /// Ticks spent in the current state, for external watchdogs.
    #[inline]
    pub fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }
}
