//! Homing procedure states.

/// Phase of the homing procedure for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// Waiting for `enable_homing`.
    #[default]
    Idle,
    /// Stepping towards the minimum limit.
    Homing,
    /// Limit seen; waiting for it to stay triggered.
    DebounceHit,
    /// Backing off until the limit releases.
    Release,
    /// Moving a fixed number of steps away from the switch.
    Offset,
    /// Zeroing the position.
    SetZero,
    /// Homed. Terminal until reset.
    Complete,
}

impl HomingState {
    /// State name for display/debugging.
    pub const fn name(self) -> &'static str {
        match self {
            HomingState::Idle => "Idle",
            HomingState::Homing => "Homing",
            HomingState::DebounceHit => "DebounceHit",
            HomingState::Release => "Release",
            HomingState::Offset => "Offset",
            HomingState::SetZero => "SetZero",
            HomingState::Complete => "Complete",
        }
    }

    /// True while the procedure is running.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, HomingState::Idle | HomingState::Complete)
    }
}
