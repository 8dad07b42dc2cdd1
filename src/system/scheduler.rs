//! Single-threaded tick scheduler with registered cross-component signals.

use crate::axis::{Axis, Direction, PerAxis};
use crate::config::MotionConfig;
use crate::encoder::{DecoderOutputs, QuadratureDecoder};
use crate::error::{MotionError, Result};
use crate::homing::HomingSequencer;
use crate::motion::{CoordinatorState, MotionCoordinator, MoveCommand};
use crate::step::{LimitFilter, LimitSwitches, PulseOutputs, StepPulseGenerator};

use super::builder::MotionSystemBuilder;
use super::io::{AxisOutputs, SystemInputs, SystemOutputs};

/// Three-axis motion core.
///
/// Anything one component hands to another (step requests, zero pulses) is
/// registered at the end of a tick and consumed on the next, so no component
/// ever sees another's same-tick output.
///
/// Limit switch levels pass through a glitch filter before they reach the
/// homing sequencer or the pulse generator interlock.
///
/// # Example
///
/// ```rust,ignore
/// let mut system = MotionSystem::builder().require_homing(false).build()?;
/// system.tick(&SystemInputs::enabled());
/// system.start_move(MoveCommand::new(400, 200, 0, 25))?;
/// while system.busy() {
///     let outputs = system.tick(&read_inputs());
///     drive_pins(&outputs);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MotionSystem {
    config: MotionConfig,
    coordinator: MotionCoordinator,
    sequencer: HomingSequencer,
    generators: PerAxis<StepPulseGenerator>,
    decoders: PerAxis<QuadratureDecoder>,
    limit_filters: PerAxis<LimitFilter>,

    // Registered on the previous tick.
    pending_requests: PerAxis<Option<Direction>>,
    pending_zero: PerAxis<bool>,
    enabled: bool,

    outputs: SystemOutputs,
    ticks: u64,
}

impl MotionSystem {
    /// Start building a system.
    pub fn builder() -> MotionSystemBuilder {
        MotionSystemBuilder::new()
    }

    /// Create a system from an already validated configuration.
    pub(crate) fn from_validated(config: MotionConfig) -> Self {
        let timing = config.timing;
        let encoder = config.encoder;
        Self {
            coordinator: MotionCoordinator::new(),
            sequencer: HomingSequencer::new(&config.homing),
            generators: PerAxis::from_fn(|_| StepPulseGenerator::new(timing)),
            decoders: PerAxis::from_fn(|_| QuadratureDecoder::new(&encoder)),
            limit_filters: PerAxis::from_fn(|_| LimitFilter::new(config.limit_filter_stages)),
            pending_requests: PerAxis::splat(None),
            pending_zero: PerAxis::splat(false),
            enabled: false,
            outputs: SystemOutputs::default(),
            ticks: 0,
            config,
        }
    }

    /// Queue a relative move.
    ///
    /// # Errors
    ///
    /// - [`MotionError::Disabled`] if `enable` was low on the last tick
    /// - [`MotionError::NotHomed`] if homing is required and incomplete
    /// - [`MotionError::StepPeriodTooShort`] if the command steps faster than
    ///   the pulse generators can retire requests
    /// - [`MotionError::Busy`] if a move is in progress
    pub fn start_move(&mut self, command: MoveCommand) -> Result<()> {
        if !self.enabled {
            return Err(MotionError::Disabled.into());
        }
        if self.homing_active() {
            return Err(MotionError::NotHomed.into());
        }

        let minimum = self.config.min_step_period();
        if u32::from(command.step_period) < minimum {
            return Err(MotionError::StepPeriodTooShort {
                period: command.step_period,
                minimum,
            }
            .into());
        }

        self.coordinator.move_start(command)
    }

    /// Abort the move in progress on the next tick.
    pub fn abort(&mut self) {
        self.coordinator.move_abort();
    }

    /// Advance every component by one tick.
    pub fn tick(&mut self, inputs: &SystemInputs) -> SystemOutputs {
        let enable = inputs.enable;
        if enable != self.enabled {
            info!("enable {}", enable);
            if !enable && self.sequencer.busy() {
                warn!("homing paused");
            }
        }
        self.enabled = enable;

        let requests = core::mem::take(&mut self.pending_requests);
        let zeros = core::mem::take(&mut self.pending_zero);
        let limits: PerAxis<LimitSwitches> = PerAxis::from_fn(|axis| {
            self.limit_filters[axis].sample(inputs.axes[axis].limits)
        });

        let mut decoded = PerAxis::splat(DecoderOutputs::default());
        for (axis, decoder) in self.decoders.iter_mut() {
            let pins = &inputs.axes[axis];
            let position_set = zeros[axis].then_some(0);
            decoded[axis] = decoder.tick(pins.encoder_a, pins.encoder_b, enable, position_set);
            if zeros[axis] {
                self.coordinator.set_position(axis, 0);
            }
        }

        let mut next_requests = PerAxis::splat(None);
        let mut next_zero = PerAxis::splat(false);
        if !enable {
            if self.coordinator.busy() {
                self.coordinator.move_abort();
            }
            self.coordinator.tick();
        } else if self.homing_active() {
            let homing = self.sequencer.tick(limits);
            next_requests = homing.step_requests;
            next_zero = homing.zero_position;
        } else {
            next_requests = self.coordinator.tick();
        }

        let mut pulses = PerAxis::splat(PulseOutputs::default());
        for (axis, generator) in self.generators.iter_mut() {
            pulses[axis] = generator.tick(requests[axis], enable, limits[axis]);
        }

        self.pending_requests = next_requests;
        self.pending_zero = next_zero;
        self.ticks = self.ticks.wrapping_add(1);

        self.outputs = self.collect(&pulses, &decoded);
        self.outputs
    }

    fn collect(
        &self,
        pulses: &PerAxis<PulseOutputs>,
        decoded: &PerAxis<DecoderOutputs>,
    ) -> SystemOutputs {
        let axes = PerAxis::from_fn(|axis| {
            let pulse = pulses[axis];
            let encoder = decoded[axis];
            AxisOutputs {
                step: pulse.step,
                direction: pulse.direction,
                enable: pulse.enable,
                position: encoder.position,
                velocity: encoder.velocity,
                encoder_error: encoder.error,
                fault: pulse.fault,
                axis_homed: self.sequencer.axis_homed(axis),
                following_error: self.commanded_position(axis) - i64::from(encoder.position),
            }
        });

        let all_axes_homed = self.sequencer.all_axes_homed();
        SystemOutputs {
            axes,
            busy: self.coordinator.busy(),
            fault: pulses.0.iter().any(|p| p.fault),
            debug_code: self.coordinator.debug_code(),
            all_axes_homed,
            not_homed_indicator: !all_axes_homed,
        }
    }

    /// True while the homing sequencer owns the pulse generators.
    #[inline]
    pub fn homing_active(&self) -> bool {
        self.config.require_homing && !self.sequencer.all_axes_homed()
    }

    /// A move is in progress.
    #[inline]
    pub fn busy(&self) -> bool {
        self.coordinator.busy()
    }

    /// A call to [`start_move`](Self::start_move) would be accepted now,
    /// step period permitting.
    pub fn ready(&self) -> bool {
        self.enabled
            && !self.homing_active()
            && self.coordinator.state() == CoordinatorState::Idle
    }

    /// Open-loop position: the homing controller's while homing, the
    /// coordinator's afterwards.
    pub fn commanded_position(&self, axis: Axis) -> i64 {
        if self.homing_active() {
            self.sequencer.controller(axis).position()
        } else {
            self.coordinator.commanded_positions()[axis]
        }
    }

    /// Outputs of the last tick.
    #[inline]
    pub fn outputs(&self) -> &SystemOutputs {
        &self.outputs
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Motion coordinator.
    #[inline]
    pub fn coordinator(&self) -> &MotionCoordinator {
        &self.coordinator
    }

    /// Homing sequencer.
    #[inline]
    pub fn sequencer(&self) -> &HomingSequencer {
        &self.sequencer
    }

    /// Pulse generator of one axis.
    #[inline]
    pub fn generator(&self, axis: Axis) -> &StepPulseGenerator {
        &self.generators[axis]
    }

    /// Quadrature decoder of one axis.
    #[inline]
    pub fn decoder(&self, axis: Axis) -> &QuadratureDecoder {
        &self.decoders[axis]
    }

    /// Filtered limit switch levels of one axis.
    #[inline]
    pub fn limits(&self, axis: Axis) -> LimitSwitches {
        self.limit_filters[axis].value()
    }

    /// Clear the sticky encoder error of every axis.
    pub fn clear_encoder_errors(&mut self) {
        for (_, decoder) in self.decoders.iter_mut() {
            decoder.clear_error();
        }
    }

    /// Ticks since creation.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HomingConfig;
    use crate::error::Error;
    use crate::homing::HomingState;

    fn open_loop() -> MotionSystem {
        MotionSystem::builder().require_homing(false).build().unwrap()
    }

    #[test]
    fn test_request_reaches_generator_one_tick_later() {
        let mut system = open_loop();
        let inputs = SystemInputs::enabled();
        system.tick(&inputs);
        system.start_move(MoveCommand::new(1, 0, 0, 10)).unwrap();

        // CalcParams, StartMovement, then 10 ticks to the first event.
        for _ in 0..11 {
            system.tick(&inputs);
        }
        let issued = system.tick(&inputs);
        assert_eq!(system.coordinator().interpolator(Axis::X).steps_done(), 1);
        assert!(!system.generator(Axis::X).busy());
        assert!(!issued.axes[Axis::X].step);

        system.tick(&inputs);
        assert!(system.generator(Axis::X).busy());
    }

    #[test]
    fn test_start_move_requires_enable() {
        let mut system = open_loop();
        assert_eq!(
            system.start_move(MoveCommand::new(1, 0, 0, 10)),
            Err(Error::Motion(MotionError::Disabled))
        );
    }

    #[test]
    fn test_start_move_requires_homing() {
        let mut system = MotionSystem::builder().build().unwrap();
        system.tick(&SystemInputs::enabled());
        assert_eq!(
            system.start_move(MoveCommand::new(1, 0, 0, 10)),
            Err(Error::Motion(MotionError::NotHomed))
        );
        assert!(system.outputs().not_homed_indicator);
    }

    #[test]
    fn test_start_move_rejects_fast_period() {
        let mut system = open_loop();
        system.tick(&SystemInputs::enabled());
        assert_eq!(
            system.start_move(MoveCommand::new(1, 0, 0, 9)),
            Err(Error::Motion(MotionError::StepPeriodTooShort {
                period: 9,
                minimum: 10
            }))
        );
        assert!(system.ready());
    }

    #[test]
    fn test_second_move_is_busy() {
        let mut system = open_loop();
        system.tick(&SystemInputs::enabled());
        system.start_move(MoveCommand::new(5, 0, 0, 10)).unwrap();
        assert!(!system.ready());
        assert_eq!(
            system.start_move(MoveCommand::new(5, 0, 0, 10)),
            Err(Error::Motion(MotionError::Busy))
        );
    }

    #[test]
    fn test_disable_aborts_move_and_drops_requests() {
        let mut system = open_loop();
        let inputs = SystemInputs::enabled();
        system.tick(&inputs);
        system.start_move(MoveCommand::new(50, 0, 0, 10)).unwrap();
        for _ in 0..30 {
            system.tick(&inputs);
        }
        assert!(system.busy());

        let disabled = SystemInputs {
            enable: false,
            ..inputs
        };
        let out = system.tick(&disabled);
        assert!(!out.axes[Axis::X].enable);
        assert!(!system.busy());
        assert!(system.coordinator().last_move_aborted());

        let pulses = system.generator(Axis::X).pulses();
        for _ in 0..50 {
            system.tick(&disabled);
        }
        assert!(system.generator(Axis::X).pulses() <= pulses + 1);
        assert_eq!(
            system.start_move(MoveCommand::new(1, 0, 0, 10)),
            Err(Error::Motion(MotionError::Disabled))
        );
    }

    #[test]
    fn test_fault_is_or_of_axes() {
        let mut system = open_loop();
        let limits = PerAxis::new(
            LimitSwitches::released(),
            LimitSwitches::from_levels(true, false),
            LimitSwitches::released(),
        );
        let inputs = SystemInputs::enabled().with_limits(limits);
        system.tick(&inputs);
        system.start_move(MoveCommand::new(0, 3, 0, 10)).unwrap();

        let mut faulted = false;
        for _ in 0..20 {
            let out = system.tick(&inputs);
            faulted |= out.fault;
            assert!(!out.axes[Axis::Y].step);
        }
        assert!(faulted);
        assert!(system.generator(Axis::Y).rejected_requests() >= 1);
        assert_eq!(system.generator(Axis::Y).pulses(), 0);
    }

    #[test]
    fn test_limit_glitch_does_not_start_debounce() {
        let mut system = MotionSystem::builder()
            .homing(HomingConfig {
                post_reset_delay: 0,
                ..HomingConfig::default()
            })
            .build()
            .unwrap();
        let released = SystemInputs::enabled();
        let mut min_hit = SystemInputs::enabled();
        min_hit.axes[Axis::Z].limits = LimitSwitches::from_levels(false, true);

        system.tick(&released);
        system.tick(&released);
        assert_eq!(system.sequencer().state(Axis::Z), HomingState::Homing);

        system.tick(&min_hit);
        system.tick(&released);
        assert_eq!(system.sequencer().state(Axis::Z), HomingState::Homing);
        assert!(!system.limits(Axis::Z).min_triggered());

        system.tick(&min_hit);
        system.tick(&min_hit);
        assert!(system.limits(Axis::Z).min_triggered());
        assert_eq!(system.sequencer().state(Axis::Z), HomingState::DebounceHit);
    }
}
