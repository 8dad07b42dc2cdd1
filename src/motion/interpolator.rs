//! Per-axis Bresenham interpolator.
//!
//! Every `step_period` ticks a major event occurs. The major axis steps on
//! every event; a minor axis steps when its error accumulator allows it, which
//! spreads `delta_minor` steps as evenly as possible over `delta_major`
//! events.

use crate::axis::Direction;

use super::command::AxisParams;

/// Interpolator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterpolatorState {
    /// Waiting for a start.
    #[default]
    Idle,
    /// Emitting steps.
    Running,
    /// Finished or aborted; returns to `Idle` on the next tick.
    Done,
}

/// Bresenham line interpolation for one axis.
#[derive(Debug, Clone, Default)]
pub struct AxisInterpolator {
    state: InterpolatorState,
    params: AxisParams,
    step_period: u16,

    /// Ticks since the last major event.
    timer: u16,

    /// Decision variable. Holds values down to `-2 * delta_major`, so it
    /// needs more than 32 bits for full-range deltas.
    error_accum: i64,

    /// Major events elapsed.
    step_counter: u32,

    /// Steps emitted while this axis is minor.
    minor_steps: u32,

    /// Commanded position in steps.
    position: i64,
}

impl AxisInterpolator {
    /// Create an idle interpolator at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a line segment.
    ///
    /// Only accepted while idle; returns `false` otherwise. A `step_period`
    /// of 0 behaves like 1.
    pub fn start(&mut self, params: AxisParams, step_period: u16) -> bool {
        if self.state != InterpolatorState::Idle {
            return false;
        }

        self.params = params;
        self.step_period = step_period;
        self.timer = 0;
        self.step_counter = 0;
        self.minor_steps = 0;
        self.error_accum =
            2 * params.delta_minor as i64 - params.delta_major as i64 - 1;
        self.state = InterpolatorState::Running;
        true
    }

    /// Stop immediately. Counters are cleared and no further steps are emitted.
    pub fn abort(&mut self) {
        if self.state == InterpolatorState::Running {
            self.state = InterpolatorState::Done;
        }
        self.timer = 0;
        self.step_counter = 0;
        self.minor_steps = 0;
        self.error_accum = 0;
    }

    /// Advance one scheduler tick.
    ///
    /// Returns the direction of the step to issue this tick, if any.
    pub fn tick(&mut self) -> Option<Direction> {
        match self.state {
            InterpolatorState::Idle => None,
            InterpolatorState::Done => {
                self.state = InterpolatorState::Idle;
                None
            }
            InterpolatorState::Running => self.run(),
        }
    }

    fn run(&mut self) -> Option<Direction> {
        if self.step_counter >= self.params.delta_major {
            self.state = InterpolatorState::Done;
            return None;
        }

        // Compare against period - 1 so that events are exactly
        // `step_period` ticks apart.
        if self.timer < self.step_period.saturating_sub(1) {
            self.timer += 1;
            return None;
        }
        self.timer = 0;
        self.step_counter += 1;

        let direction = self.params.direction;
        if self.params.is_major {
            self.position += direction.sign();
            return Some(direction);
        }

        // The decision uses the accumulator before this event's increment.
        let fire = self.error_accum >= 0;
        if fire {
            self.error_accum -= 2 * self.params.delta_major as i64;
            self.minor_steps += 1;
            self.position += direction.sign();
        }
        self.error_accum += 2 * self.params.delta_minor as i64;

        fire.then_some(direction)
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> InterpolatorState {
        self.state
    }

    /// True only while running.
    #[inline]
    pub fn busy(&self) -> bool {
        self.state == InterpolatorState::Running
    }

    /// Parameters of the current or last segment.
    #[inline]
    pub fn params(&self) -> &AxisParams {
        &self.params
    }

    /// Steps emitted by this axis in the current or last segment.
    #[inline]
    pub fn steps_done(&self) -> u32 {
        if self.params.is_major {
            self.step_counter
        } else {
            self.minor_steps
        }
    }

    /// Major events elapsed in the current or last segment.
    #[inline]
    pub fn step_counter(&self) -> u32 {
        self.step_counter
    }

    /// Current decision variable.
    #[inline]
    pub fn error_accum(&self) -> i64 {
        self.error_accum
    }

    /// Commanded position in steps.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Overwrite the commanded position.
    #[inline]
    pub fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}
