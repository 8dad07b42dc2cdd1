//! Step pulse timing.

use serde::Deserialize;

/// Fixed STEP/DIR timing, in scheduler ticks.
///
/// A pulse cycle is: direction latched and held for `dir_setup_ticks`, STEP
/// high for `pulse_width_ticks`, then STEP low for `hold_ticks +
/// dir_hold_ticks` before the generator accepts the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PulseTiming {
    /// DIR stable time before the STEP rising edge.
    pub dir_setup_ticks: u32,
    /// STEP high time.
    pub pulse_width_ticks: u32,
    /// STEP low time after the falling edge.
    pub hold_ticks: u32,
    /// Extra DIR hold margin appended to the hold phase.
    pub dir_hold_ticks: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            dir_setup_ticks: 2,
            pulse_width_ticks: 4,
            hold_ticks: 2,
            dir_hold_ticks: 1,
        }
    }
}

impl PulseTiming {
    /// Minimum number of ticks between two accepted step requests.
    ///
    /// One tick to accept, then the setup, pulse and hold phases.
    #[inline]
    pub const fn min_request_interval(&self) -> u32 {
        1 + self.dir_setup_ticks + self.pulse_width_ticks + self.hold_ticks + self.dir_hold_ticks
    }
}
