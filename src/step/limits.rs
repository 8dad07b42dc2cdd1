//! Travel limit switch inputs.

use crate::axis::Direction;
use crate::encoder::DigitalFilter;

/// Raw min/max limit switch levels for one axis.
///
/// Switches are active-low: a `false` level means triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitSwitches {
    /// Raw level of the minimum-travel switch.
    pub min_level: bool,
    /// Raw level of the maximum-travel switch.
    pub max_level: bool,
}

impl Default for LimitSwitches {
    fn default() -> Self {
        Self::released()
    }
}

impl LimitSwitches {
    /// Both switches released (pulled high).
    #[inline]
    pub const fn released() -> Self {
        Self {
            min_level: true,
            max_level: true,
        }
    }

    /// Build from raw pin levels.
    #[inline]
    pub const fn from_levels(min_level: bool, max_level: bool) -> Self {
        Self {
            min_level,
            max_level,
        }
    }

    /// Minimum switch is triggered.
    #[inline]
    pub const fn min_triggered(&self) -> bool {
        !self.min_level
    }

    /// Maximum switch is triggered.
    #[inline]
    pub const fn max_triggered(&self) -> bool {
        !self.max_level
    }

    /// The switch guarding travel in `direction` is triggered.
    #[inline]
    pub fn blocks(&self, direction: Direction) -> bool {
        match direction {
            Direction::Positive => self.max_triggered(),
            Direction::Negative => self.min_triggered(),
        }
    }
}

/// Glitch filter for both switches of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitFilter {
    min: DigitalFilter,
    max: DigitalFilter,
}

impl LimitFilter {
    /// Create a filter with `stages` samples, settled at released.
    pub fn new(stages: u8) -> Self {
        Self {
            min: DigitalFilter::new(stages, true),
            max: DigitalFilter::new(stages, true),
        }
    }

    /// Shift in one raw sample and return the filtered levels.
    pub fn sample(&mut self, raw: LimitSwitches) -> LimitSwitches {
        LimitSwitches::from_levels(self.min.sample(raw.min_level), self.max.sample(raw.max_level))
    }

    /// Filtered levels.
    #[inline]
    pub fn value(&self) -> LimitSwitches {
        LimitSwitches::from_levels(self.min.value(), self.max.value())
    }
}
