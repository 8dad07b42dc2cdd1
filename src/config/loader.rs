//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::MotionConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
///
/// ```rust,ignore
/// use triaxis_motion::load_config;
///
/// let config = load_config("machine.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MotionConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MotionConfig> {
    let config: MotionConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

// Keep as much of the message as fits instead of dropping it entirely.
fn truncated(message: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in message.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let toml = r#"
require_homing = false
limit_filter_stages = 4

[timing]
dir_setup_ticks = 3
pulse_width_ticks = 5

[encoder]
filter_stages = 2
velocity_window = 250

[homing]
step_period = 40
offset_steps = 100
order = ["x", "y", "z"]

[axes.y]
invert_direction = true
"#;

        let config = parse_config(toml).unwrap();
        assert!(!config.require_homing);
        assert_eq!(config.limit_filter_stages, 4);
        assert_eq!(config.timing.dir_setup_ticks, 3);
        assert_eq!(config.timing.hold_ticks, 2);
        assert_eq!(config.encoder.filter_stages, 2);
        assert_eq!(config.homing.offset_steps, 100);
        assert_eq!(config.homing.order.as_slice(), &[Axis::X, Axis::Y, Axis::Z]);
        assert!(config.axes.y.invert_direction);
        assert!(!config.axes.x.invert_direction);
    }

    #[test]
    fn test_parse_trajectory() {
        let toml = r#"
[trajectory]
step_period = 12
points = [[0, 0, 0], [100, 50, -25]]
"#;

        let config = parse_config(toml).unwrap();
        let trajectory = config.trajectory.unwrap();
        assert_eq!(trajectory.step_period, 12);
        assert_eq!(trajectory.points.len(), 2);
        assert_eq!(trajectory.points[1], [100, 50, -25]);
    }

    #[test]
    fn test_parse_rejects_bad_order() {
        let toml = r#"
[homing]
order = ["z", "z", "x"]
"#;
        assert_eq!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidHomingOrder))
        );
    }

    #[test]
    fn test_parse_error_message() {
        let result = parse_config("[timing]\npulse_width_ticks = \"wide\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
