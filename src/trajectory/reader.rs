//! Walks a position table as relative moves.

use crate::config::TrajectoryConfig;
use crate::error::{Error, Result, TrajectoryError};
use crate::motion::MoveCommand;
use crate::system::MotionSystem;

use super::table::PositionTable;

/// Issues the moves between consecutive table entries.
///
/// The first move starts from the origin, which is where homing leaves every
/// axis.
#[derive(Debug, Clone)]
pub struct TrajectoryReader {
    table: PositionTable,
    step_period: u16,
    index: usize,
    current: [i32; 3],
}

impl TrajectoryReader {
    /// Create a reader starting at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Empty`] if the table has no positions.
    pub fn new(table: PositionTable, step_period: u16) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::Trajectory(TrajectoryError::Empty));
        }
        Ok(Self {
            table,
            step_period,
            index: 0,
            current: [0; 3],
        })
    }

    /// Create a reader from the `[trajectory]` section.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Empty`] if no positions are configured.
    pub fn from_config(config: &TrajectoryConfig) -> Result<Self> {
        Self::new(PositionTable::from_config(config), config.step_period)
    }

    /// The move to the next table entry, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::DeltaOverflow`] if an axis delta does not
    /// fit in 32 bits.
    pub fn next_command(&self) -> Result<Option<MoveCommand>> {
        let Some(target) = self.table.get(self.index) else {
            return Ok(None);
        };

        let mut delta = [0i32; 3];
        for (d, (to, from)) in delta.iter_mut().zip(target.iter().zip(self.current.iter())) {
            *d = to.checked_sub(*from).ok_or(Error::Trajectory(
                TrajectoryError::DeltaOverflow { index: self.index },
            ))?;
        }

        Ok(Some(MoveCommand::new(
            delta[0],
            delta[1],
            delta[2],
            self.step_period,
        )))
    }

    /// Start the next move if the system can take one.
    ///
    /// Returns `true` when a move was issued.
    ///
    /// # Errors
    ///
    /// Propagates delta overflow and any [`MotionSystem::start_move`]
    /// rejection other than the system not being ready.
    pub fn poll(&mut self, system: &mut MotionSystem) -> Result<bool> {
        if self.is_finished() || !system.ready() {
            return Ok(false);
        }
        let Some(command) = self.next_command()? else {
            return Ok(false);
        };

        system.start_move(command)?;
        if let Some(target) = self.table.get(self.index) {
            self.current = target;
        }
        debug!("trajectory entry {} issued", self.index);
        self.index += 1;
        Ok(true)
    }

    /// Every entry has been issued.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.index >= self.table.len()
    }

    /// Index of the next entry.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position the last issued move ends at.
    #[inline]
    pub fn current(&self) -> [i32; 3] {
        self.current
    }

    /// Start again from the first entry. The machine is assumed to be back
    /// at the origin.
    pub fn rewind(&mut self) {
        self.index = 0;
        self.current = [0; 3];
    }

    /// Underlying table.
    #[inline]
    pub fn table(&self) -> &PositionTable {
        &self.table
    }
}
