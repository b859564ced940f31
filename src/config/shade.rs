//! Shade configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::shade::ShadeState;
use crate::switch::{ActiveLevel, Pull, Switch};

use super::units::{Millis, PinId};

/// Complete shade configuration from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShadeConfig {
    /// Device name used in status messages (max 32 chars).
    pub name: String<32>,

    /// Switch that closes when the shade is fully open (0 = not installed).
    #[serde(default)]
    pub open_switch_pin: PinId,

    /// How long the motor may run toward open.
    #[serde(rename = "open_time_limit_ms")]
    pub open_time_limit: Millis,

    /// Switch that closes when the shade is fully closed (0 = not installed).
    #[serde(default)]
    pub closed_switch_pin: PinId,

    /// How long the motor may run toward closed.
    #[serde(rename = "close_time_limit_ms")]
    pub close_time_limit: Millis,

    /// Input level that means "contact" on both switches.
    pub switch_active_level: ActiveLevel,

    /// Pull resistor setting for both switch inputs.
    pub pull: Pull,

    /// Direction output energized while opening.
    pub motor_open_pin: PinId,

    /// Direction output energized while closing.
    pub motor_close_pin: PinId,

    /// PWM output controlling motor speed.
    pub motor_speed_pin: PinId,

    /// PWM duty cycle while moving, in percent (1-100).
    pub speed_percent: u8,

    /// Invert direction output logic (asserted = low).
    pub invert_output: bool,

    /// Position to drive toward at power-up.
    pub start_state: ShadeState,
}

impl ShadeConfig {
    /// Pin identifier of the given switch.
    pub fn switch_pin(&self, switch: Switch) -> PinId {
        match switch {
            Switch::Opened => self.open_switch_pin,
            Switch::Closed => self.closed_switch_pin,
        }
    }

    /// Whether the given switch is wired.
    pub fn has_switch(&self, switch: Switch) -> bool {
        self.switch_pin(switch).is_installed()
    }

    /// Time limit for a move that ends at the given switch.
    pub fn time_limit(&self, switch: Switch) -> Millis {
        match switch {
            Switch::Opened => self.open_time_limit,
            Switch::Closed => self.close_time_limit,
        }
    }

    /// Every pin this shade claims, switches only when installed.
    pub fn claimed_pins(&self) -> impl Iterator<Item = PinId> + '_ {
        [
            self.open_switch_pin,
            self.closed_switch_pin,
            self.motor_open_pin,
            self.motor_close_pin,
            self.motor_speed_pin,
        ]
        .into_iter()
        .filter(|pin| pin.is_installed())
    }
}
