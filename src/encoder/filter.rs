//! Shift-register input filter.

/// N-stage glitch filter for one digital input.
///
/// The filtered value only changes once the last `stages` samples all agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitalFilter {
    mask: u8,
    history: u8,
    value: bool,
}

impl DigitalFilter {
    /// Create a filter with `stages` samples (clamped to 1-8) settled at `initial`.
    pub fn new(stages: u8, initial: bool) -> Self {
        let stages = stages.clamp(1, 8);
        let mask = if stages == 8 { u8::MAX } else { (1u8 << stages) - 1 };
        Self {
            mask,
            history: if initial { mask } else { 0 },
            value: initial,
        }
    }

    /// Shift in one raw sample and return the filtered value.
    pub fn sample(&mut self, level: bool) -> bool {
        self.history = ((self.history << 1) | level as u8) & self.mask;
        if self.history == self.mask {
            self.value = true;
        } else if self.history == 0 {
            self.value = false;
        }
        self.value
    }

    /// Filtered value.
    #[inline]
    pub fn value(&self) -> bool {
        self.value
    }
}
