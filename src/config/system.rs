//! System configuration - root configuration structure.

use serde::Deserialize;

use super::axis::AxesConfig;
use super::encoder::EncoderConfig;
use super::homing::HomingConfig;
use super::timing::PulseTiming;
use super::trajectory::TrajectoryConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// STEP/DIR timing.
    pub timing: PulseTiming,

    /// Encoder filter and velocity window.
    pub encoder: EncoderConfig,

    /// Homing procedure.
    pub homing: HomingConfig,

    /// Pin polarity per axis.
    pub axes: AxesConfig,

    /// Glitch filter depth on the limit switch inputs.
    pub limit_filter_stages: u8,

    /// Refuse moves until every axis is homed.
    pub require_homing: bool,

    /// Optional position table.
    pub trajectory: Option<TrajectoryConfig>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            timing: PulseTiming::default(),
            encoder: EncoderConfig::default(),
            homing: HomingConfig::default(),
            axes: AxesConfig::default(),
            limit_filter_stages: 2,
            require_homing: true,
            trajectory: None,
        }
    }
}

impl MotionConfig {
    /// Minimum `step_period` a move may use.
    #[inline]
    pub fn min_step_period(&self) -> u32 {
        self.timing.min_request_interval()
    }
}
