//! Configuration validation.

use crate::error::{short_name, ConfigError, Error, Result};

use super::{ShadeConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks, for every shade:
/// - Speed percent is in range
/// - Both time limits are non-zero
/// - Start state is not a transient state
/// - All three motor outputs are assigned
/// - No pin is used for two roles
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, shade) in config.shades.iter() {
        validate_shade(shade)?;
    }

    Ok(())
}

/// Validate a single shade configuration.
pub fn validate_shade(config: &ShadeConfig) -> Result<()> {
    let shade = || short_name::<32>(config.name.as_str());

    if config.speed_percent == 0 || config.speed_percent > 100 {
        return Err(Error::Config(ConfigError::InvalidSpeed(config.speed_percent)));
    }

    if config.open_time_limit.0 == 0 || config.close_time_limit.0 == 0 {
        return Err(Error::Config(ConfigError::ZeroTimeLimit { shade: shade() }));
    }

    if config.start_state.is_transient() {
        return Err(Error::Config(ConfigError::InvalidStartState { shade: shade() }));
    }

    let outputs = [
        config.motor_open_pin,
        config.motor_close_pin,
        config.motor_speed_pin,
    ];
    if outputs.iter().any(|pin| !pin.is_installed()) {
        return Err(Error::Config(ConfigError::UnassignedPin { shade: shade() }));
    }

    // Quadratic, but there are at most five pins.
    for (i, pin) in config.claimed_pins().enumerate() {
        if config.claimed_pins().skip(i + 1).any(|other| other == pin) {
            return Err(Error::Config(ConfigError::PinConflict {
                shade: shade(),
                pin: pin.value(),
            }));
        }
    }

    Ok(())
}
