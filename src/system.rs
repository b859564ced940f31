//! Shade system facade for multi-shade configuration.
//!
//! Owns the configuration and the one [`PendingTimers`] every shade built from
//! it reports into.

use crate::clock::Clock;
use crate::config::{ShadeConfig, SystemConfig};
use crate::error::Result;
use crate::motor::MotorDrive;
use crate::shade::{Shade, ShadeBuilder};
use crate::switch::SwitchInput;
use crate::timer::PendingTimers;

/// A facade for building shades from one configuration.
///
/// # Example
///
/// ```rust,ignore
/// use shade_control::ShadeSystem;
///
/// let system = ShadeSystem::from_config(shade_control::load_config("shades.toml")?);
///
/// let mut den = system.build_shade("den", den_motor, den_switches, clock)?;
/// let mut hall = system.build_shade("hall", hall_motor, hall_switches, clock)?;
///
/// loop {
///     den.poll()?;
///     hall.poll()?;
///     if !system.any_timers_pending() {
///         // nothing is timing a motion, safe to idle
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct ShadeSystem {
    /// The system configuration.
    config: SystemConfig,
    /// Shared by every shade built here.
    timers: PendingTimers,
}

impl ShadeSystem {
    /// Create a new shade system from configuration.
    pub fn from_config(config: SystemConfig) -> Self {
        Self {
            config,
            timers: PendingTimers::new(),
        }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get a shade configuration by name.
    pub fn shade_config(&self, name: &str) -> Option<&ShadeConfig> {
        self.config.shade(name)
    }

    /// Check if a shade name exists in the configuration.
    pub fn has_shade(&self, name: &str) -> bool {
        self.config.shade(name).is_some()
    }

    /// List all configured shade names.
    pub fn shade_names(&self) -> impl Iterator<Item = &str> {
        self.config.shade_names()
    }

    /// The shared pending-timer counter.
    pub fn timers(&self) -> &PendingTimers {
        &self.timers
    }

    /// Whether any shade built here is waiting on a time limit.
    pub fn any_timers_pending(&self) -> bool {
        self.timers.any_pending()
    }

    /// Build a shade by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name doesn't exist, the configuration is
    /// invalid, or the first motor command fails.
    pub fn build_shade<M, S, C>(
        &self,
        name: &str,
        motor: M,
        switches: S,
        clock: C,
    ) -> Result<Shade<'_, M, S, C>>
    where
        M: MotorDrive,
        S: SwitchInput,
        C: Clock,
    {
        ShadeBuilder::new()
            .from_config(&self.config, name)?
            .motor(motor)
            .switches(switches)
            .clock(clock)
            .timers(&self.timers)
            .build()
    }
}
