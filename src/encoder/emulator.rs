//! STEP/DIR to quadrature replay for running without physical encoders.

use heapless::Deque;

use crate::axis::Direction;

use super::QUADRATURE_SEQUENCE;

const MAX_IN_FLIGHT: usize = 16;

/// Produces the A/B signals an ideal encoder would emit for a stepper.
///
/// Each STEP rising edge advances the quadrature phase by one in the latched
/// DIR direction, `delay_ticks` ticks later.
#[derive(Debug, Clone)]
pub struct EncoderEmulator {
    delay_ticks: u32,
    now: u64,
    in_flight: Deque<(u64, Direction), MAX_IN_FLIGHT>,
    phase: u8,
    last_step: bool,
    position: i64,
    dropped: u32,
}

impl EncoderEmulator {
    /// Create an emulator resting at phase 0 (A and B low).
    pub fn new(delay_ticks: u32) -> Self {
        Self {
            delay_ticks,
            now: 0,
            in_flight: Deque::new(),
            phase: 0,
            last_step: false,
            position: 0,
            dropped: 0,
        }
    }

    /// Sample STEP/DIR for one tick and return the A/B levels.
    pub fn tick(&mut self, step: bool, direction: Direction) -> (bool, bool) {
        if step && !self.last_step {
            let due = self.now + self.delay_ticks as u64;
            if self.in_flight.push_back((due, direction)).is_err() {
                self.dropped = self.dropped.wrapping_add(1);
            }
        }
        self.last_step = step;

        while let Some(&(due, direction)) = self.in_flight.front() {
            if due > self.now {
                break;
            }
            self.in_flight.pop_front();
            self.advance(direction);
        }

        self.now += 1;
        self.levels()
    }

    fn advance(&mut self, direction: Direction) {
        self.phase = match direction {
            Direction::Positive => (self.phase + 1) % 4,
            Direction::Negative => (self.phase + 3) % 4,
        };
        self.position += direction.sign();
    }

    /// Current A/B levels.
    #[inline]
    pub fn levels(&self) -> (bool, bool) {
        QUADRATURE_SEQUENCE[self.phase as usize]
    }

    /// Steps replayed so far.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Edges lost because too many were in flight.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncoderConfig;
    use crate::encoder::QuadratureDecoder;

    #[test]
    fn test_rising_edges_only() {
        let mut emu = EncoderEmulator::new(0);
        assert_eq!(emu.tick(true, Direction::Positive), QUADRATURE_SEQUENCE[1]);
        // STEP still high: no new edge
        assert_eq!(emu.tick(true, Direction::Positive), QUADRATURE_SEQUENCE[1]);
        emu.tick(false, Direction::Positive);
        assert_eq!(emu.tick(true, Direction::Negative), QUADRATURE_SEQUENCE[0]);
        assert_eq!(emu.position(), 0);
    }

    #[test]
    fn test_delay() {
        let mut emu = EncoderEmulator::new(3);
        assert_eq!(emu.tick(true, Direction::Positive), QUADRATURE_SEQUENCE[0]);
        assert_eq!(emu.tick(false, Direction::Positive), QUADRATURE_SEQUENCE[0]);
        assert_eq!(emu.tick(false, Direction::Positive), QUADRATURE_SEQUENCE[0]);
        assert_eq!(emu.tick(false, Direction::Positive), QUADRATURE_SEQUENCE[1]);
    }

    #[test]
    fn test_decoder_follows_emulator() {
        let config = EncoderConfig {
            filter_stages: 2,
            velocity_window: 1000,
            emulator_delay_ticks: 1,
        };
        let mut emu = EncoderEmulator::new(config.emulator_delay_ticks);
        let mut dec = QuadratureDecoder::new(&config);

        // 21 positive pulses of 3 ticks high, 3 low; the first one primes.
        for i in 0..21 * 6 {
            let step = i % 6 < 3;
            let (a, b) = emu.tick(step, Direction::Positive);
            dec.tick(a, b, true, None);
        }
        for _ in 0..10 {
            let (a, b) = emu.tick(false, Direction::Positive);
            dec.tick(a, b, true, None);
        }
        assert_eq!(emu.position(), 21);
        assert_eq!(dec.position(), 20);
        assert!(!dec.error());
    }
}
