//! Feed-rate helpers for callers of the motion core.
//!
//! The core only ever sees a `step_period` in ticks. Converting a physical
//! rate to ticks is a division, which belongs on the caller side.

use libm::roundf;

/// Ticks between major-axis steps for a feed rate.
///
/// Returns `None` when the rate is not positive or the resulting period does
/// not fit the 16-bit `step_period` field.
pub fn step_period_for_rate(tick_hz: u32, steps_per_sec: f32) -> Option<u16> {
    if !(steps_per_sec > 0.0) || tick_hz == 0 {
        return None;
    }
    let period = roundf(tick_hz as f32 / steps_per_sec);
    if period < 1.0 || period > u16::MAX as f32 {
        return None;
    }
    Some(period as u16)
}

/// Major-axis step rate produced by a `step_period`.
#[inline]
pub fn rate_for_step_period(tick_hz: u32, step_period: u16) -> f32 {
    tick_hz as f32 / step_period.max(1) as f32
}

/// Convert a velocity sample (steps per window) to steps per second.
#[inline]
pub fn velocity_steps_per_sec(tick_hz: u32, velocity_window: u32, sample: i32) -> f32 {
    sample as f32 * tick_hz as f32 / velocity_window.max(1) as f32
}
