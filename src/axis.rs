//! Axis identifiers, step direction, and a fixed three-slot per-axis map.

use core::ops::{Index, IndexMut};

use serde::Deserialize;

/// One of the three machine axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// X axis.
    #[default]
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// All axes in tie-break priority order (X over Y over Z).
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Slot index of this axis (X=0, Y=1, Z=2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for a slot index.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Single-letter axis name.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position (DIR level high before inversion).
    #[default]
    Positive,
    /// Decreasing position.
    Negative,
}

impl Direction {
    /// Direction for a signed displacement. Zero counts as positive.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    /// Sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Logical DIR level (`true` = positive).
    #[inline]
    pub fn is_positive(self) -> bool {
        self == Direction::Positive
    }
}

/// A value for each of X, Y and Z, indexable by [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PerAxis<T>(pub [T; 3]);

impl<T> PerAxis<T> {
    /// Build from explicit X, Y, Z values.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// Build by calling `f` once per axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self([f(Axis::X), f(Axis::Y), f(Axis::Z)])
    }

    /// Transform each value.
    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> PerAxis<U> {
        let [x, y, z] = self.0;
        PerAxis([f(Axis::X, x), f(Axis::Y, y), f(Axis::Z, z)])
    }

    /// Iterate `(axis, &value)` pairs in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate `(axis, &mut value)` pairs in X, Y, Z order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Axis, &mut T)> {
        Axis::ALL.into_iter().zip(self.0.iter_mut())
    }
}

impl<T: Copy> PerAxis<T> {
    /// Same value on every axis.
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self([value; 3])
    }
}

impl PerAxis<bool> {
    /// True if any axis is set.
    #[inline]
    pub fn any(&self) -> bool {
        self.0.iter().any(|v| *v)
    }

    /// True if every axis is set.
    #[inline]
    pub fn all(&self) -> bool {
        self.0.iter().all(|v| *v)
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    #[inline]
    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.index()]
    }
}
