//! Builder pattern for Shade.

use crate::clock::Clock;
use crate::config::{validate_shade, ShadeConfig, SystemConfig};
use crate::error::{short_name, ConfigError, Error, Result};
use crate::motor::MotorDrive;
use crate::switch::SwitchInput;
use crate::timer::PendingTimers;

use super::machine::Shade;

/// Builder for creating Shade instances.
pub struct ShadeBuilder<'t, M, S, C>
where
    M: MotorDrive,
    S: SwitchInput,
    C: Clock,
{
    config: Option<ShadeConfig>,
    motor: Option<M>,
    switches: Option<S>,
    clock: Option<C>,
    timers: Option<&'t PendingTimers>,
}

impl<M, S, C> Default for ShadeBuilder<'_, M, S, C>
where
    M: MotorDrive,
    S: SwitchInput,
    C: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'t, M, S, C> ShadeBuilder<'t, M, S, C>
where
    M: MotorDrive,
    S: SwitchInput,
    C: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            motor: None,
            switches: None,
            clock: None,
            timers: None,
        }
    }

    /// Set the shade configuration.
    pub fn config(mut self, config: ShadeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Configure from SystemConfig by shade name.
    pub fn from_config(self, config: &SystemConfig, shade_name: &str) -> Result<Self> {
        let shade_config = config.shade(shade_name).ok_or_else(|| {
            Error::Config(ConfigError::ShadeNotFound(short_name(shade_name)))
        })?;

        Ok(self.config(shade_config.clone()))
    }

    /// Set the motor outputs.
    pub fn motor(mut self, motor: M) -> Self {
        self.motor = Some(motor);
        self
    }

    /// Set the switch input.
    pub fn switches(mut self, switches: S) -> Self {
        self.switches = Some(switches);
        self
    }

    /// Set the clock.
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the shared pending-timer counter.
    pub fn timers(mut self, timers: &'t PendingTimers) -> Self {
        self.timers = Some(timers);
        self
    }

    /// Build the Shade.
    ///
    /// The configuration is validated, then the shade starts moving toward
    /// its configured start state.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is missing, the configuration is
    /// invalid, or the first motor command fails.
    pub fn build(self) -> Result<Shade<'t, M, S, C>> {
        let config = self
            .config
            .ok_or(Error::Config(ConfigError::MissingComponent("config")))?;
        let motor = self
            .motor
            .ok_or(Error::Config(ConfigError::MissingComponent("motor")))?;
        let switches = self
            .switches
            .ok_or(Error::Config(ConfigError::MissingComponent("switches")))?;
        let clock = self
            .clock
            .ok_or(Error::Config(ConfigError::MissingComponent("clock")))?;
        let timers = self
            .timers
            .ok_or(Error::Config(ConfigError::MissingComponent("timers")))?;

        validate_shade(&config)?;

        Shade::new(config, motor, switches, clock, timers)
    }
}
