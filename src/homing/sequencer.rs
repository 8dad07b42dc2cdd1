//! Cascaded homing of all three axes.

use crate::axis::{Axis, Direction, PerAxis};
use crate::config::HomingConfig;
use crate::step::LimitSwitches;

use super::controller::AxisHomingController;
use super::state::HomingState;

const DEFAULT_ORDER: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];

/// Outputs of one sequencer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequencerOutputs {
    /// Homing step requests per axis.
    pub step_requests: PerAxis<Option<Direction>>,
    /// Axes whose position is zeroed this tick.
    pub zero_position: PerAxis<bool>,
    /// Axes that have completed homing.
    pub axis_homed: PerAxis<bool>,
    /// Every axis is homed.
    pub all_axes_homed: bool,
}

/// Runs the per-axis homing procedures as an ordered list of tasks.
///
/// The first task is enabled once `post_reset_delay` ticks have elapsed.
/// Each later task is enabled by the previous task's `axis_homed` as
/// registered on the tick before, so a cascade step always costs one tick.
#[derive(Debug, Clone)]
pub struct HomingSequencer {
    order: [Axis; 3],
    controllers: PerAxis<AxisHomingController>,
    post_reset_delay: u32,
    elapsed: u32,
    enables: PerAxis<bool>,
    homed: PerAxis<bool>,
}

impl HomingSequencer {
    /// Create a sequencer from the homing configuration.
    ///
    /// An order that does not list each axis once falls back to Z, Y, X;
    /// [`validate_config`](crate::config::validate_config) rejects such
    /// configurations up front.
    pub fn new(config: &HomingConfig) -> Self {
        let order = if config.order_is_complete() {
            [config.order[0], config.order[1], config.order[2]]
        } else {
            DEFAULT_ORDER
        };

        Self {
            order,
            controllers: PerAxis::from_fn(|axis| AxisHomingController::new(axis, config)),
            post_reset_delay: config.post_reset_delay,
            elapsed: 0,
            enables: PerAxis::splat(false),
            homed: PerAxis::splat(false),
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self, limits: PerAxis<LimitSwitches>) -> SequencerOutputs {
        let mut enables = PerAxis::splat(false);
        enables[self.order[0]] = self.elapsed >= self.post_reset_delay;
        for pair in self.order.windows(2) {
            enables[pair[1]] = self.homed[pair[0]];
            if enables[pair[1]] && !self.enables[pair[1]] {
                debug!("homing hand-off {} -> {}", pair[0], pair[1]);
            }
        }
        self.enables = enables;

        let mut out = SequencerOutputs::default();
        for (axis, ctrl) in self.controllers.iter_mut() {
            let result = ctrl.tick(enables[axis], limits[axis]);
            out.step_requests[axis] = result.step_request;
            out.zero_position[axis] = result.zero_position;
            out.axis_homed[axis] = result.axis_homed;
        }

        if out.axis_homed.all() && !self.homed.all() {
            info!("all axes homed after {} ticks", self.elapsed);
        }
        self.homed = out.axis_homed;
        self.elapsed = self.elapsed.saturating_add(1);

        out.all_axes_homed = self.all_axes_homed();
        out
    }

    /// Cascade order.
    #[inline]
    pub fn order(&self) -> &[Axis; 3] {
        &self.order
    }

    /// The task currently running or waiting to start, if any remain.
    pub fn current_task(&self) -> Option<Axis> {
        self.order.iter().copied().find(|axis| !self.homed[*axis])
    }

    /// Enable applied to `axis` on the last tick.
    #[inline]
    pub fn enable_homing(&self, axis: Axis) -> bool {
        self.enables[axis]
    }

    /// Axis homed as of the last tick.
    #[inline]
    pub fn axis_homed(&self, axis: Axis) -> bool {
        self.homed[axis]
    }

    /// Every axis homed.
    #[inline]
    pub fn all_axes_homed(&self) -> bool {
        self.homed.all()
    }

    /// Inverted all-homed indicator, high until homing completes.
    #[inline]
    pub fn not_homed_indicator(&self) -> bool {
        !self.all_axes_homed()
    }

    /// Some axis is part way through its procedure.
    pub fn busy(&self) -> bool {
        self.controllers.0.iter().any(|ctrl| ctrl.state().is_active())
    }

    /// Homing state of one axis.
    #[inline]
    pub fn state(&self, axis: Axis) -> HomingState {
        self.controllers[axis].state()
    }

    /// Controller of one axis.
    #[inline]
    pub fn controller(&self, axis: Axis) -> &AxisHomingController {
        &self.controllers[axis]
    }

    /// Ticks since reset.
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> HomingConfig {
        HomingConfig {
            step_period: 2,
            debounce_ticks: 3,
            offset_steps: 4,
            post_reset_delay: 5,
            ..HomingConfig::default()
        }
    }

    const ON_SWITCH: PerAxis<LimitSwitches> =
        PerAxis::splat(LimitSwitches::from_levels(false, true));

    #[test]
    fn test_waits_for_post_reset_delay() {
        let mut seq = HomingSequencer::new(&config());
        for _ in 0..5 {
            seq.tick(PerAxis::splat(LimitSwitches::released()));
            assert!(!seq.enable_homing(Axis::Z));
            assert!(!seq.busy());
        }
        seq.tick(PerAxis::splat(LimitSwitches::released()));
        assert!(seq.enable_homing(Axis::Z));
        assert_eq!(seq.state(Axis::Z), HomingState::Homing);
        assert_eq!(seq.state(Axis::Y), HomingState::Idle);
        assert!(seq.busy());
        assert!(seq.not_homed_indicator());
    }

    #[test]
    fn test_only_current_task_steps() {
        let mut seq = HomingSequencer::new(&HomingConfig {
            post_reset_delay: 0,
            ..config()
        });
        for _ in 0..50 {
            let out = seq.tick(PerAxis::splat(LimitSwitches::released()));
            assert_eq!(out.step_requests[Axis::X], None);
            assert_eq!(out.step_requests[Axis::Y], None);
        }
        assert_eq!(seq.controller(Axis::Z).position(), -24);
        assert_eq!(seq.current_task(), Some(Axis::Z));
    }

    #[test]
    fn test_cascade_advances_one_tick_after_homed() {
        let mut seq = HomingSequencer::new(&HomingConfig {
            post_reset_delay: 0,
            ..config()
        });

        // The current axis sits on its switch while seeking and debouncing,
        // and the switch releases as soon as it backs off.
        let mut z_homed_at = None;
        let mut y_enabled_at = None;
        for t in 0..200u32 {
            let limits = match seq.state(seq.current_task().unwrap_or(Axis::X)) {
                HomingState::Homing | HomingState::DebounceHit => ON_SWITCH,
                _ => PerAxis::splat(LimitSwitches::released()),
            };
            let out = seq.tick(limits);
            if out.axis_homed[Axis::Z] && z_homed_at.is_none() {
                z_homed_at = Some(t);
            }
            if seq.enable_homing(Axis::Y) && y_enabled_at.is_none() {
                y_enabled_at = Some(t);
            }
            if out.all_axes_homed {
                break;
            }
        }

        let z = z_homed_at.unwrap();
        assert_eq!(y_enabled_at, Some(z + 1));
        assert!(seq.all_axes_homed());
        assert!(!seq.busy());
        assert!(!seq.not_homed_indicator());
        assert_eq!(seq.current_task(), None);
        for axis in Axis::ALL {
            assert_eq!(seq.controller(axis).position(), 0);
            assert_eq!(seq.controller(axis).offset_count(), 4);
        }
    }

    #[test]
    fn test_custom_order() {
        let mut order = heapless::Vec::new();
        order.extend_from_slice(&[Axis::X, Axis::Z, Axis::Y]).unwrap();
        let seq = HomingSequencer::new(&HomingConfig { order, ..config() });
        assert_eq!(seq.order(), &[Axis::X, Axis::Z, Axis::Y]);
        assert_eq!(seq.current_task(), Some(Axis::X));
    }

    #[test]
    fn test_incomplete_order_falls_back() {
        let mut order = heapless::Vec::new();
        order.push(Axis::X).unwrap();
        let seq = HomingSequencer::new(&HomingConfig { order, ..config() });
        assert_eq!(seq.order(), &DEFAULT_ORDER);
    }
}
