//! Quadrature encoder feedback.
//!
//! [`QuadratureDecoder`] turns raw A/B levels into a position counter and a
//! windowed velocity. [`EncoderEmulator`] replays STEP/DIR as A/B for
//! closed-loop testing without physical encoders.

mod decoder;
mod emulator;
mod filter;

pub use decoder::{DecoderOutputs, QuadratureDecoder, Transition};
pub use emulator::EncoderEmulator;
pub use filter::DigitalFilter;

/// A/B levels in forward order: A leads B.
pub(crate) const QUADRATURE_SEQUENCE: [(bool, bool); 4] =
    [(false, false), (true, false), (true, true), (false, true)];

/// Position of an A/B pair within [`QUADRATURE_SEQUENCE`].
pub(crate) fn phase_of(a: bool, b: bool) -> u8 {
    match (a, b) {
        (false, false) => 0,
        (true, false) => 1,
        (true, true) => 2,
        (false, true) => 3,
    }
}
