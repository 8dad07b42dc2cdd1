//! Builder pattern for MotionSystem.

use crate::config::{
    validate_config, AxesConfig, EncoderConfig, HomingConfig, MotionConfig, PulseTiming,
};
use crate::error::Result;

use super::scheduler::MotionSystem;

/// Builder for creating [`MotionSystem`] instances.
///
/// Starts from the built-in defaults; every section can be replaced and the
/// result is validated once in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct MotionSystemBuilder {
    config: MotionConfig,
}

impl MotionSystemBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every section from a loaded configuration.
    pub fn from_config(mut self, config: MotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the STEP/DIR timing.
    pub fn timing(mut self, timing: PulseTiming) -> Self {
        self.config.timing = timing;
        self
    }

    /// Set the encoder filter and velocity window.
    pub fn encoder(mut self, encoder: EncoderConfig) -> Self {
        self.config.encoder = encoder;
        self
    }

    /// Set the homing procedure.
    pub fn homing(mut self, homing: HomingConfig) -> Self {
        self.config.homing = homing;
        self
    }

    /// Set per-axis pin polarity.
    pub fn axes(mut self, axes: AxesConfig) -> Self {
        self.config.axes = axes;
        self
    }

    /// Set the glitch filter depth on the limit switch inputs.
    pub fn limit_filter_stages(mut self, stages: u8) -> Self {
        self.config.limit_filter_stages = stages;
        self
    }

    /// Require homing before moves are accepted.
    ///
    /// When disabled the homing sequencer never runs and the coordinator
    /// drives the pulse generators from the first tick.
    pub fn require_homing(mut self, require: bool) -> Self {
        self.config.require_homing = require;
        self
    }

    /// Validate the configuration and build the system.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of the configuration.
    pub fn build(self) -> Result<MotionSystem> {
        validate_config(&self.config)?;
        Ok(MotionSystem::from_validated(self.config))
    }
}
