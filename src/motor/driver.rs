//! Shade motor output driver.
//!
//! Generic over embedded-hal 1.0 output and PWM types.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::ShadeConfig;
use crate::error::{MotorError, Result};

use super::command::{Command, MotorDrive};

/// Two direction outputs plus one PWM speed output.
///
/// Generic over:
/// - `OPEN`: open-direction pin (must implement `OutputPin`)
/// - `CLOSE`: close-direction pin (must implement `OutputPin`)
/// - `SPEED`: speed output (must implement `SetDutyCycle`)
pub struct MotorOutput<OPEN, CLOSE, SPEED>
where
    OPEN: OutputPin,
    CLOSE: OutputPin,
    SPEED: SetDutyCycle,
{
    /// Energized while opening.
    open_pin: OPEN,

    /// Energized while closing.
    close_pin: CLOSE,

    /// PWM enable/speed output.
    speed: SPEED,

    /// Duty applied while moving.
    speed_percent: u8,

    /// Whether direction pin logic is inverted (asserted = low).
    invert: bool,

    /// Last command applied successfully.
    last: Command,
}

impl<OPEN, CLOSE, SPEED> MotorOutput<OPEN, CLOSE, SPEED>
where
    OPEN: OutputPin,
    CLOSE: OutputPin,
    SPEED: SetDutyCycle,
{
    /// Create a driver. Outputs are not touched until the first command.
    ///
    /// `speed_percent` is clamped to 100.
    pub fn new(open_pin: OPEN, close_pin: CLOSE, speed: SPEED, speed_percent: u8, invert: bool) -> Self {
        Self {
            open_pin,
            close_pin,
            speed,
            speed_percent: speed_percent.min(100),
            invert,
            last: Command::Stop,
        }
    }

    /// Create a driver using the speed and inversion from a shade configuration.
    pub fn from_config(open_pin: OPEN, close_pin: CLOSE, speed: SPEED, config: &ShadeConfig) -> Self {
        Self::new(
            open_pin,
            close_pin,
            speed,
            config.speed_percent,
            config.invert_output,
        )
    }

    /// Last command applied.
    #[inline]
    pub fn last_command(&self) -> Command {
        self.last
    }

    /// Whether the motor is currently powered.
    #[inline]
    pub fn is_energized(&self) -> bool {
        self.last.energizes()
    }

    /// Configured running speed in percent.
    #[inline]
    pub fn speed_percent(&self) -> u8 {
        self.speed_percent
    }

    /// Give the pins back.
    pub fn release(self) -> (OPEN, CLOSE, SPEED) {
        (self.open_pin, self.close_pin, self.speed)
    }

    fn set_open(&mut self, asserted: bool) -> Result<()> {
        if asserted != self.invert {
            self.open_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.open_pin.set_low().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    fn set_close(&mut self, asserted: bool) -> Result<()> {
        if asserted != self.invert {
            self.close_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.close_pin.set_low().map_err(|_| MotorError::PinError)?;
        }
        Ok(())
    }

    fn set_speed(&mut self, percent: u8) -> Result<()> {
        self.speed
            .set_duty_cycle_percent(percent)
            .map_err(|_| MotorError::PwmError)?;
        Ok(())
    }
}

impl<OPEN, CLOSE, SPEED> MotorDrive for MotorOutput<OPEN, CLOSE, SPEED>
where
    OPEN: OutputPin,
    CLOSE: OutputPin,
    SPEED: SetDutyCycle,
{
    /// Apply a command.
    ///
    /// Speed is cut first and the opposing direction released before the
    /// requested direction is asserted, so both directions are never energized
    /// together.
    fn drive(&mut self, command: Command) -> Result<()> {
        self.set_speed(0)?;
        match command {
            Command::Stop => {
                self.set_open(false)?;
                self.set_close(false)?;
            }
            Command::Open => {
                self.set_close(false)?;
                self.set_open(true)?;
                self.set_speed(self.speed_percent)?;
            }
            Command::Close => {
                self.set_open(false)?;
                self.set_close(true)?;
                self.set_speed(self.speed_percent)?;
            }
        }
        self.last = command;
        Ok(())
    }
}
