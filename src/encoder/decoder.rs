//! Quadrature decoder with input filtering and windowed velocity.

use crate::axis::Direction;
use crate::config::EncoderConfig;

use super::filter::DigitalFilter;
use super::phase_of;

/// Classification of a change between two filtered A/B states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Same state.
    NoChange,
    /// One step forward in the Gray sequence.
    Forward,
    /// One step backward in the Gray sequence.
    Reverse,
    /// Both channels changed at once.
    Illegal,
}

impl Transition {
    /// Classify a move from `prev` to `next` (phase indices 0-3).
    #[inline]
    pub fn classify(prev: u8, next: u8) -> Self {
        match next.wrapping_sub(prev) & 0b11 {
            0 => Transition::NoChange,
            1 => Transition::Forward,
            3 => Transition::Reverse,
            _ => Transition::Illegal,
        }
    }
}

/// Decoder outputs after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderOutputs {
    /// Position in steps.
    pub position: i32,
    /// Signed steps counted over the last complete velocity window.
    pub velocity: i32,
    /// Direction of the last valid edge.
    pub direction: Direction,
    /// An illegal transition has been seen.
    pub error: bool,
}

/// Quadrature decoder for one axis.
///
/// Every valid Gray-code edge moves the position by one. Illegal transitions
/// raise a sticky error flag but do not stop counting. The first transition
/// seen after reset or enable is discarded, since it usually reflects the
/// encoder's power-on state rather than motion.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    filter_a: DigitalFilter,
    filter_b: DigitalFilter,
    phase: u8,
    primed: bool,
    enabled: bool,

    position: i32,
    direction: Direction,
    error: bool,

    velocity_window: u32,
    velocity_ticks: u32,
    velocity_accum: i32,
    velocity: i32,

    illegal_count: u32,
}

impl QuadratureDecoder {
    /// Create a decoder at position 0.
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            filter_a: DigitalFilter::new(config.filter_stages, false),
            filter_b: DigitalFilter::new(config.filter_stages, false),
            phase: 0,
            primed: false,
            enabled: false,
            position: 0,
            direction: Direction::Positive,
            error: false,
            velocity_window: config.velocity_window.max(1),
            velocity_ticks: 0,
            velocity_accum: 0,
            velocity: 0,
            illegal_count: 0,
        }
    }

    /// Advance one tick with raw A/B levels.
    ///
    /// `position_set` overwrites the position and wins over any edge decoded
    /// in the same tick.
    pub fn tick(
        &mut self,
        a: bool,
        b: bool,
        enable: bool,
        position_set: Option<i32>,
    ) -> DecoderOutputs {
        if let Some(position) = position_set {
            self.position = position;
        }

        if !enable {
            self.enabled = false;
            self.primed = false;
            return self.outputs();
        }
        self.enabled = true;

        let clean_a = self.filter_a.sample(a);
        let clean_b = self.filter_b.sample(b);
        let phase = phase_of(clean_a, clean_b);

        let mut delta = 0i32;
        if phase != self.phase {
            let transition = Transition::classify(self.phase, phase);
            self.phase = phase;

            if !self.primed {
                self.primed = true;
            } else {
                match transition {
                    Transition::Forward => {
                        self.direction = Direction::Positive;
                        delta = 1;
                    }
                    Transition::Reverse => {
                        self.direction = Direction::Negative;
                        delta = -1;
                    }
                    Transition::Illegal => {
                        if !self.error {
                            warn!("encoder sequence error at position {}", self.position);
                        }
                        self.error = true;
                        self.illegal_count = self.illegal_count.wrapping_add(1);
                    }
                    Transition::NoChange => {}
                }
            }
        }

        if position_set.is_none() {
            self.position = self.position.wrapping_add(delta);
        }

        self.velocity_accum = self.velocity_accum.wrapping_add(delta);
        self.velocity_ticks += 1;
        if self.velocity_ticks >= self.velocity_window {
            self.velocity = self.velocity_accum;
            self.velocity_accum = 0;
            self.velocity_ticks = 0;
        }

        self.outputs()
    }

    /// Current outputs.
    pub fn outputs(&self) -> DecoderOutputs {
        DecoderOutputs {
            position: self.position,
            velocity: self.velocity,
            direction: self.direction,
            error: self.error,
        }
    }

    /// Position in steps.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Last latched velocity sample.
    #[inline]
    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    /// Sticky sequence error flag.
    #[inline]
    pub fn error(&self) -> bool {
        self.error
    }

    /// Number of illegal transitions seen.
    #[inline]
    pub fn illegal_transitions(&self) -> u32 {
        self.illegal_count
    }

    /// Clear the sequence error flag.
    pub fn clear_error(&mut self) {
        self.error = false;
    }
}
