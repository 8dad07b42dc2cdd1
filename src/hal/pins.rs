//! GPIO adapters.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::axis::Direction;
use crate::config::AxisConfig;
use crate::error::{Error, Result};
use crate::step::LimitSwitches;
use crate::system::{AxisInputs, AxisOutputs};

/// Output pins of one stepper driver.
///
/// Levels are cached, so a pin is only written when its level changes.
pub struct StepDirPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    step_pin: STEP,
    dir_pin: DIR,
    enable_pin: EN,
    invert_direction: bool,
    invert_enable: bool,
    step_level: Option<bool>,
    dir_level: Option<bool>,
    enable_level: Option<bool>,
}

impl<STEP, DIR, EN> StepDirPins<STEP, DIR, EN>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
{
    /// Wrap the driver pins. Nothing is written until the first
    /// [`apply`](Self::apply).
    pub fn new(step_pin: STEP, dir_pin: DIR, enable_pin: EN, config: &AxisConfig) -> Self {
        Self {
            step_pin,
            dir_pin,
            enable_pin,
            invert_direction: config.invert_direction,
            invert_enable: config.invert_enable,
            step_level: None,
            dir_level: None,
            enable_level: None,
        }
    }

    /// Drive the pins from one tick's axis outputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin write fails. The cached level is left
    /// unchanged so the write is retried on the next call.
    pub fn apply(&mut self, outputs: &AxisOutputs) -> Result<()> {
        let dir = outputs.direction.is_positive() != self.invert_direction;
        let enable = outputs.enable != self.invert_enable;

        // DIR before STEP so a direction change never races the edge.
        write_cached(&mut self.dir_pin, &mut self.dir_level, dir)?;
        write_cached(&mut self.enable_pin, &mut self.enable_level, enable)?;
        write_cached(&mut self.step_pin, &mut self.step_level, outputs.step)
    }

    /// Direction currently on the DIR pin, if written.
    pub fn direction(&self) -> Option<Direction> {
        self.dir_level.map(|level| {
            if level != self.invert_direction {
                Direction::Positive
            } else {
                Direction::Negative
            }
        })
    }

    /// Release the pins.
    pub fn release(self) -> (STEP, DIR, EN) {
        (self.step_pin, self.dir_pin, self.enable_pin)
    }
}

fn write_cached<P: OutputPin>(pin: &mut P, cache: &mut Option<bool>, level: bool) -> Result<()> {
    if *cache == Some(level) {
        return Ok(());
    }
    if level {
        pin.set_high().map_err(|_| Error::Pin)?;
    } else {
        pin.set_low().map_err(|_| Error::Pin)?;
    }
    *cache = Some(level);
    Ok(())
}

/// Input pins of one axis: limit switches and encoder channels.
pub struct SensorPins<MIN, MAX, A, B>
where
    MIN: InputPin,
    MAX: InputPin,
    A: InputPin,
    B: InputPin,
{
    limit_min: MIN,
    limit_max: MAX,
    encoder_a: A,
    encoder_b: B,
}

impl<MIN, MAX, A, B> SensorPins<MIN, MAX, A, B>
where
    MIN: InputPin,
    MAX: InputPin,
    A: InputPin,
    B: InputPin,
{
    /// Wrap the sensor pins.
    pub fn new(limit_min: MIN, limit_max: MAX, encoder_a: A, encoder_b: B) -> Self {
        Self {
            limit_min,
            limit_max,
            encoder_a,
            encoder_b,
        }
    }

    /// Sample every input once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin read fails.
    pub fn sample(&mut self) -> Result<AxisInputs> {
        let min_level = self.limit_min.is_high().map_err(|_| Error::Pin)?;
        let max_level = self.limit_max.is_high().map_err(|_| Error::Pin)?;
        let encoder_a = self.encoder_a.is_high().map_err(|_| Error::Pin)?;
        let encoder_b = self.encoder_b.is_high().map_err(|_| Error::Pin)?;

        Ok(AxisInputs {
            limits: LimitSwitches::from_levels(min_level, max_level),
            encoder_a,
            encoder_b,
        })
    }

    /// Release the pins.
    pub fn release(self) -> (MIN, MAX, A, B) {
        (self.limit_min, self.limit_max, self.encoder_a, self.encoder_b)
    }
}

/// Driver outputs and sensor inputs of one axis.
pub struct AxisPins<STEP, DIR, EN, MIN, MAX, A, B>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    MIN: InputPin,
    MAX: InputPin,
    A: InputPin,
    B: InputPin,
{
    /// STEP/DIR/ENABLE outputs.
    pub driver: StepDirPins<STEP, DIR, EN>,
    /// Limit and encoder inputs.
    pub sensors: SensorPins<MIN, MAX, A, B>,
}

impl<STEP, DIR, EN, MIN, MAX, A, B> AxisPins<STEP, DIR, EN, MIN, MAX, A, B>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    MIN: InputPin,
    MAX: InputPin,
    A: InputPin,
    B: InputPin,
{
    /// Pair a driver with its sensors.
    pub fn new(driver: StepDirPins<STEP, DIR, EN>, sensors: SensorPins<MIN, MAX, A, B>) -> Self {
        Self { driver, sensors }
    }

    /// Sample the inputs for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin read fails.
    #[inline]
    pub fn sample(&mut self) -> Result<AxisInputs> {
        self.sensors.sample()
    }

    /// Drive the outputs of the last tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pin`] if a pin write fails.
    #[inline]
    pub fn apply(&mut self, outputs: &AxisOutputs) -> Result<()> {
        self.driver.apply(outputs)
    }
}
