//! Quadrature encoder configuration.

use serde::Deserialize;

/// Encoder input filtering and velocity sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Shift-register depth of the A/B input filter (1-8).
    pub filter_stages: u8,

    /// Ticks per velocity sample.
    pub velocity_window: u32,

    /// STEP-to-quadrature delay of the encoder emulator.
    pub emulator_delay_ticks: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            filter_stages: 4,
            velocity_window: 1000,
            emulator_delay_ticks: 1,
        }
    }
}
