//! Step pulse timing generator.
//!
//! Each accepted request runs one fixed cycle: DIR setup, STEP high, STEP
//! low hold. The requester must not issue requests faster than
//! [`PulseTiming::min_request_interval`]; requests arriving mid-cycle are
//! counted as overruns and dropped.

use crate::axis::Direction;
use crate::config::PulseTiming;

use super::limits::LimitSwitches;

/// Pulse generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseState {
    /// Ready for a request.
    #[default]
    Idle,
    /// DIR latched, STEP low.
    DirSetup,
    /// STEP high.
    StepPulse,
    /// STEP low, DIR held.
    StepHold,
}

/// Output levels after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseOutputs {
    /// STEP level.
    pub step: bool,
    /// Latched direction.
    pub direction: Direction,
    /// Driver enable level (logical, before inversion).
    pub enable: bool,
    /// A request was dropped at a triggered limit.
    pub fault: bool,
}

/// STEP/DIR pulse generator for one axis.
#[derive(Debug, Clone)]
pub struct StepPulseGenerator {
    timing: PulseTiming,
    state: PulseState,
    remaining: u32,
    direction: Direction,
    enable: bool,
    fault: bool,
    pulses: u32,
    rejected: u32,
    overruns: u32,
}

impl StepPulseGenerator {
    /// Create an idle generator.
    pub fn new(timing: PulseTiming) -> Self {
        Self {
            timing,
            state: PulseState::Idle,
            remaining: 0,
            direction: Direction::Positive,
            enable: false,
            fault: false,
            pulses: 0,
            rejected: 0,
            overruns: 0,
        }
    }

    /// Advance one tick.
    ///
    /// `request` is the step requested for this tick, `enable` the driver
    /// enable input and `limits` the raw limit switch levels.
    pub fn tick(
        &mut self,
        request: Option<Direction>,
        enable: bool,
        limits: LimitSwitches,
    ) -> PulseOutputs {
        self.enable = enable;

        if request.is_some() && self.state != PulseState::Idle {
            self.overruns = self.overruns.wrapping_add(1);
        }

        match self.state {
            PulseState::Idle => match request {
                Some(direction) if enable => {
                    if limits.blocks(direction) {
                        if !self.fault {
                            warn!("step dropped at limit: dir={}", direction);
                        }
                        self.fault = true;
                        self.rejected = self.rejected.wrapping_add(1);
                    } else {
                        self.fault = false;
                        self.direction = direction;
                        self.enter(PulseState::DirSetup, self.timing.dir_setup_ticks);
                    }
                }
                Some(_) => {}
                None => self.fault = false,
            },
            PulseState::DirSetup => {
                if self.count_down() {
                    self.pulses = self.pulses.wrapping_add(1);
                    self.enter(PulseState::StepPulse, self.timing.pulse_width_ticks);
                }
            }
            PulseState::StepPulse => {
                if self.count_down() {
                    let hold = self.timing.hold_ticks + self.timing.dir_hold_ticks;
                    self.enter(PulseState::StepHold, hold);
                }
            }
            PulseState::StepHold => {
                if self.count_down() {
                    self.state = PulseState::Idle;
                }
            }
        }

        self.outputs()
    }

    fn enter(&mut self, state: PulseState, ticks: u32) {
        self.state = state;
        self.remaining = ticks;
    }

    /// Returns true when the current phase has elapsed.
    fn count_down(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Current output levels.
    pub fn outputs(&self) -> PulseOutputs {
        PulseOutputs {
            step: self.state == PulseState::StepPulse,
            direction: self.direction,
            enable: self.enable,
            fault: self.fault,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> PulseState {
        self.state
    }

    /// True unless idle.
    #[inline]
    pub fn busy(&self) -> bool {
        self.state != PulseState::Idle
    }

    /// Limit interlock fault flag.
    #[inline]
    pub fn fault(&self) -> bool {
        self.fault
    }

    /// STEP pulses started since creation.
    #[inline]
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Requests dropped at a triggered limit.
    #[inline]
    pub fn rejected_requests(&self) -> u32 {
        self.rejected
    }

    /// Requests that arrived while a cycle was in progress.
    #[inline]
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Timing in use.
    #[inline]
    pub fn timing(&self) -> &PulseTiming {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> PulseTiming {
        PulseTiming {
            dir_setup_ticks: 2,
            pulse_width_ticks: 3,
            hold_ticks: 2,
            dir_hold_ticks: 1,
        }
    }

    /// Tick with a single request at t=0, returning STEP levels per tick.
    fn trace(gen: &mut StepPulseGenerator, direction: Direction, ticks: usize) -> Vec<bool> {
        (0..ticks)
            .map(|t| {
                let request = (t == 0).then_some(direction);
                gen.tick(request, true, LimitSwitches::released()).step
            })
            .collect()
    }

    #[test]
    fn test_pulse_shape() {
        let mut gen = StepPulseGenerator::new(timing());
        let steps = trace(&mut gen, Direction::Negative, 12);
        // accept, 2 setup ticks (the accept tick counts), 3 high, 3 low hold
        assert_eq!(
            steps,
            vec![false, false, true, true, true, false, false, false, false, false, false, false]
        );
        assert_eq!(gen.outputs().direction, Direction::Negative);
        assert_eq!(gen.pulses(), 1);
    }

    #[test]
    fn test_back_to_back_at_min_interval() {
        let mut gen = StepPulseGenerator::new(timing());
        let interval = timing().min_request_interval() as usize;
        assert_eq!(interval, 9);

        let mut rising = Vec::new();
        let mut last = false;
        for t in 0..interval * 3 {
            let request = (t % interval == 0).then_some(Direction::Positive);
            let out = gen.tick(request, true, LimitSwitches::released());
            if out.step && !last {
                rising.push(t);
            }
            last = out.step;
        }
        assert_eq!(rising, vec![2, 11, 20]);
        assert_eq!(gen.overruns(), 0);
    }

    #[test]
    fn test_request_mid_cycle_is_an_overrun() {
        let mut gen = StepPulseGenerator::new(timing());
        gen.tick(Some(Direction::Positive), true, LimitSwitches::released());
        gen.tick(Some(Direction::Positive), true, LimitSwitches::released());
        assert_eq!(gen.overruns(), 1);
        for _ in 0..20 {
            gen.tick(None, true, LimitSwitches::released());
        }
        assert_eq!(gen.pulses(), 1);
    }

    #[test]
    fn test_max_limit_blocks_positive_request() {
        let mut gen = StepPulseGenerator::new(timing());
        let max_hit = LimitSwitches::from_levels(true, false);

        let out = gen.tick(Some(Direction::Positive), true, max_hit);
        assert!(out.fault);
        assert_eq!(gen.state(), PulseState::Idle);
        for _ in 0..10 {
            assert!(!gen.tick(None, true, max_hit).step);
        }
        assert_eq!(gen.pulses(), 0);
        assert_eq!(gen.rejected_requests(), 1);
    }

    #[test]
    fn test_fault_clears_when_no_request_pending() {
        let mut gen = StepPulseGenerator::new(timing());
        let max_hit = LimitSwitches::from_levels(true, false);
        assert!(gen.tick(Some(Direction::Positive), true, max_hit).fault);
        assert!(gen.tick(Some(Direction::Positive), true, max_hit).fault);
        assert!(!gen.tick(None, true, max_hit).fault);
    }

    #[test]
    fn test_max_limit_allows_moving_away() {
        let mut gen = StepPulseGenerator::new(timing());
        let max_hit = LimitSwitches::from_levels(true, false);
        let out = gen.tick(Some(Direction::Negative), true, max_hit);
        assert!(!out.fault);
        assert_eq!(gen.state(), PulseState::DirSetup);
    }

    #[test]
    fn test_disabled_drops_requests() {
        let mut gen = StepPulseGenerator::new(timing());
        let out = gen.tick(Some(Direction::Positive), false, LimitSwitches::released());
        assert!(!out.enable);
        assert!(!out.fault);
        assert_eq!(gen.state(), PulseState::Idle);
    }
}
