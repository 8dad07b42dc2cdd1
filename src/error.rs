//! Error types for triaxis-motion.
//!
//! Runtime faults (limit violations, encoder sequence errors) are level
//! signals on the tick outputs, not errors. The types here cover
//! configuration, command protocol misuse, trajectory tables, and pin I/O.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all triaxis-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Move command rejected
    Motion(MotionError),
    /// Trajectory table error
    Trajectory(TrajectoryError),
    /// A GPIO pin read or write failed
    Pin,
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A pulse timing phase is zero ticks long
    InvalidTiming(&'static str),
    /// Encoder filter depth outside 1..=8
    InvalidFilterStages(u8),
    /// Velocity window must be at least one tick
    InvalidVelocityWindow(u32),
    /// Homing offset must be at least one step
    InvalidOffsetSteps(u32),
    /// Homing order must name each axis exactly once
    InvalidHomingOrder,
    /// A step period is shorter than the pulse pipeline can retire
    StepPeriodTooShort {
        /// Configured period in ticks
        period: u32,
        /// Minimum period in ticks
        minimum: u32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Move command errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A move is already in progress
    Busy,
    /// Homing is required and has not completed
    NotHomed,
    /// The global enable input is low
    Disabled,
    /// Requested step period is faster than the pulse pipeline
    StepPeriodTooShort {
        /// Requested period in ticks
        period: u16,
        /// Minimum period in ticks
        minimum: u32,
    },
}

/// Trajectory table errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    /// The table has no positions
    Empty,
    /// The table is full
    TooManyPoints,
    /// A relative move between two table entries does not fit in 32 bits
    DeltaOverflow {
        /// Index of the offending table entry
        index: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Trajectory(e) => write!(f, "Trajectory error: {}", e),
            Error::Pin => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTiming(phase) => {
                write!(f, "Invalid pulse timing: {} must be at least 1 tick", phase)
            }
            ConfigError::InvalidFilterStages(v) => {
                write!(f, "Invalid filter stages: {}. Must be 1-8", v)
            }
            ConfigError::InvalidVelocityWindow(v) => {
                write!(f, "Invalid velocity window: {}. Must be > 0", v)
            }
            ConfigError::InvalidOffsetSteps(v) => {
                write!(f, "Invalid homing offset: {} steps. Must be > 0", v)
            }
            ConfigError::InvalidHomingOrder => {
                write!(f, "Homing order must list X, Y and Z exactly once")
            }
            ConfigError::StepPeriodTooShort { period, minimum } => {
                write!(f, "Step period {} ticks is below the minimum of {}", period, minimum)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Busy => write!(f, "A move is already in progress"),
            MotionError::NotHomed => write!(f, "Axes are not homed"),
            MotionError::Disabled => write!(f, "Motion is disabled"),
            MotionError::StepPeriodTooShort { period, minimum } => {
                write!(f, "Step period {} ticks is below the minimum of {}", period, minimum)
            }
        }
    }
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryError::Empty => write!(f, "Trajectory table is empty"),
            TrajectoryError::TooManyPoints => write!(f, "Trajectory table is full"),
            TrajectoryError::DeltaOverflow { index } => {
                write!(f, "Relative move to entry {} overflows 32 bits", index)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<TrajectoryError> for Error {
    fn from(e: TrajectoryError) -> Self {
        Error::Trajectory(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for TrajectoryError {}
