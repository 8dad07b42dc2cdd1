//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::MotionConfig;

/// Validate a motion configuration.
///
/// Checks:
/// - Every pulse timing phase lasts at least one tick
/// - Encoder and limit filter depths and the velocity window are in range
/// - Homing steps no faster than the pulse pipeline can retire them
/// - Homing order names each axis once
/// - A configured trajectory uses a feasible step period
pub fn validate_config(config: &MotionConfig) -> Result<()> {
    validate_timing(config)?;
    validate_encoder(config)?;
    validate_homing(config)?;

    if let Some(ref trajectory) = config.trajectory {
        check_period(trajectory.step_period as u32, config.min_step_period())?;
    }

    Ok(())
}

fn validate_timing(config: &MotionConfig) -> Result<()> {
    let timing = &config.timing;
    let phases = [
        ("dir_setup_ticks", timing.dir_setup_ticks),
        ("pulse_width_ticks", timing.pulse_width_ticks),
        ("hold_ticks", timing.hold_ticks),
    ];
    for (name, ticks) in phases {
        if ticks == 0 {
            return Err(Error::Config(ConfigError::InvalidTiming(name)));
        }
    }
    Ok(())
}

fn validate_encoder(config: &MotionConfig) -> Result<()> {
    let encoder = &config.encoder;
    for stages in [encoder.filter_stages, config.limit_filter_stages] {
        if stages == 0 || stages > 8 {
            return Err(Error::Config(ConfigError::InvalidFilterStages(stages)));
        }
    }
    if encoder.velocity_window == 0 {
        return Err(Error::Config(ConfigError::InvalidVelocityWindow(
            encoder.velocity_window,
        )));
    }
    Ok(())
}

fn validate_homing(config: &MotionConfig) -> Result<()> {
    let homing = &config.homing;
    check_period(homing.step_period, config.min_step_period())?;

    if homing.offset_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidOffsetSteps(
            homing.offset_steps,
        )));
    }

    if !homing.order_is_complete() {
        return Err(Error::Config(ConfigError::InvalidHomingOrder));
    }

    Ok(())
}

fn check_period(period: u32, minimum: u32) -> Result<()> {
    if period < minimum {
        return Err(Error::Config(ConfigError::StepPeriodTooShort { period, minimum }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncoderConfig, HomingConfig, PulseTiming};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MotionConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_pulse_width() {
        let config = MotionConfig {
            timing: PulseTiming {
                pulse_width_ticks: 0,
                ..PulseTiming::default()
            },
            ..MotionConfig::default()
        };
        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidTiming("pulse_width_ticks")))
        );
    }

    #[test]
    fn test_filter_stages_out_of_range() {
        let config = MotionConfig {
            encoder: EncoderConfig {
                filter_stages: 9,
                ..EncoderConfig::default()
            },
            ..MotionConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidFilterStages(9)))
        ));
    }

    #[test]
    fn test_limit_filter_must_have_a_stage() {
        let config = MotionConfig {
            limit_filter_stages: 0,
            ..MotionConfig::default()
        };
        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidFilterStages(0)))
        );
    }

    #[test]
    fn test_homing_faster_than_pipeline() {
        let config = MotionConfig {
            homing: HomingConfig {
                step_period: 5,
                ..HomingConfig::default()
            },
            ..MotionConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::StepPeriodTooShort {
                period: 5,
                minimum: 10
            }))
        ));
    }
}
