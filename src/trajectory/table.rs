//! Fixed-capacity list of absolute positions.

use heapless::Vec;

use crate::config::{TrajectoryConfig, MAX_TRAJECTORY_POINTS};
use crate::error::{Error, Result, TrajectoryError};

/// Absolute `[x, y, z]` step positions visited in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionTable {
    points: Vec<[i32; 3], MAX_TRAJECTORY_POINTS>,
}

impl PositionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a slice of positions.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::TooManyPoints`] if the slice exceeds the
    /// table capacity.
    pub fn from_points(points: &[[i32; 3]]) -> Result<Self> {
        Vec::from_slice(points)
            .map(|points| Self { points })
            .map_err(|_| Error::Trajectory(TrajectoryError::TooManyPoints))
    }

    /// Build from the `[trajectory]` section.
    pub fn from_config(config: &TrajectoryConfig) -> Self {
        Self {
            points: config.points.clone(),
        }
    }

    /// Append a position.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::TooManyPoints`] if the table is full.
    pub fn push(&mut self, position: [i32; 3]) -> Result<()> {
        self.points
            .push(position)
            .map_err(|_| Error::Trajectory(TrajectoryError::TooManyPoints))
    }

    /// Position at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<[i32; 3]> {
        self.points.get(index).copied()
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate positions in order.
    pub fn iter(&self) -> impl Iterator<Item = &[i32; 3]> {
        self.points.iter()
    }
}
