//! Position table configuration from TOML.

use heapless::Vec;
use serde::Deserialize;

/// Maximum number of absolute positions in a configured trajectory.
pub const MAX_TRAJECTORY_POINTS: usize = 64;

/// A fixed list of absolute `[x, y, z]` step positions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrajectoryConfig {
    /// Ticks between major-axis steps for every segment.
    pub step_period: u16,

    /// Absolute positions, visited in order.
    pub points: Vec<[i32; 3], MAX_TRAJECTORY_POINTS>,
}
