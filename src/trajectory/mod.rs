//! Trajectory source.
//!
//! A [`PositionTable`] holds absolute positions; a [`TrajectoryReader`] walks
//! it and feeds the motion system one relative move at a time.

mod reader;
mod table;

pub use reader::TrajectoryReader;
pub use table::PositionTable;
