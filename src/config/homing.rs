//! Homing procedure configuration.

use heapless::Vec;
use serde::Deserialize;

use crate::axis::Axis;

/// Fixed parameters of the limit-switch homing procedure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Ticks between homing step requests.
    pub step_period: u32,

    /// Ticks the minimum limit must stay triggered before the hit is trusted.
    pub debounce_ticks: u32,

    /// Steps travelled away from the switch after it releases.
    pub offset_steps: u32,

    /// Ticks after reset before the first axis starts homing.
    pub post_reset_delay: u32,

    /// Cascade order. Each axis starts once the previous one is homed.
    pub order: Vec<Axis, 3>,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            step_period: 20,
            debounce_ticks: 50,
            offset_steps: 200,
            post_reset_delay: 100,
            order: Vec::from_slice(&[Axis::Z, Axis::Y, Axis::X]).unwrap_or_default(),
        }
    }
}

impl HomingConfig {
    /// Check that the cascade names every axis exactly once.
    pub fn order_is_complete(&self) -> bool {
        self.order.len() == 3 && Axis::ALL.iter().all(|axis| self.order.contains(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_zyx() {
        let config = HomingConfig::default();
        assert_eq!(config.order.as_slice(), &[Axis::Z, Axis::Y, Axis::X]);
        assert!(config.order_is_complete());
    }

    #[test]
    fn test_duplicate_axis_is_incomplete() {
        let config = HomingConfig {
            order: Vec::from_slice(&[Axis::Z, Axis::Z, Axis::X]).unwrap(),
            ..HomingConfig::default()
        };
        assert!(!config.order_is_complete());
    }
}
