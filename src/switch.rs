//! Limit switch inputs.
//!
//! The shade never owns a debouncer. It asks a [`SwitchInput`] for the current
//! level of a switch by pin identifier, and it accepts edge notifications from
//! whatever interrupt layer the board has. Both end up in a [`SwitchCache`] that
//! the next poll tick reads.

use embedded_hal::digital::InputPin;
use serde::Deserialize;

use crate::config::units::PinId;
use crate::config::ShadeConfig;

/// Which limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    /// Trips when the shade reaches fully open.
    Opened,
    /// Trips when the shade reaches fully closed.
    Closed,
}

/// Electrical level of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Transition reported by an interrupt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high.
    Rising,
    /// High to low.
    Falling,
}

impl Edge {
    /// Level of the input after this edge.
    pub fn level(self) -> Level {
        match self {
            Edge::Rising => Level::High,
            Edge::Falling => Level::Low,
        }
    }
}

/// Input level that means "contact".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ActiveLevel {
    /// Switch pulls the input low (typical with a pull-up).
    #[default]
    Low,
    /// Switch drives the input high.
    High,
}

impl ActiveLevel {
    /// Whether `level` means the switch is closed.
    #[inline]
    pub fn is_asserted(self, level: Level) -> bool {
        matches!(
            (self, level),
            (ActiveLevel::Low, Level::Low) | (ActiveLevel::High, Level::High)
        )
    }
}

/// Pull resistor applied to both switch inputs.
///
/// The shade does not configure pins itself; board code reads this when it
/// sets up the input pins it hands to [`PinSwitches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Pull {
    /// Internal pull-up enabled.
    #[default]
    Up,
    /// Internal pull-down enabled.
    Down,
    /// Floating input, external resistor expected.
    None,
}

/// Read access to switch levels by pin identifier.
pub trait SwitchInput {
    /// Current level of the switch on `pin`, or `None` if it cannot be read.
    fn level(&mut self, pin: PinId) -> Option<Level>;
}

/// Input for a shade with no switches installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSwitches;

impl SwitchInput for NoSwitches {
    fn level(&mut self, _pin: PinId) -> Option<Level> {
        None
    }
}

/// [`SwitchInput`] over up to two embedded-hal input pins.
pub struct PinSwitches<OPENED, CLOSED>
where
    OPENED: InputPin,
    CLOSED: InputPin,
{
    opened: Option<(PinId, OPENED)>,
    closed: Option<(PinId, CLOSED)>,
}

impl<OPENED, CLOSED> PinSwitches<OPENED, CLOSED>
where
    OPENED: InputPin,
    CLOSED: InputPin,
{
    /// Pair each pin with the identifier the shade configuration gives it.
    ///
    /// A pin whose configured identifier is 0 is dropped.
    pub fn new(config: &ShadeConfig, opened: Option<OPENED>, closed: Option<CLOSED>) -> Self {
        let opened_id = config.open_switch_pin;
        let closed_id = config.closed_switch_pin;
        Self {
            opened: opened.filter(|_| opened_id.is_installed()).map(|p| (opened_id, p)),
            closed: closed.filter(|_| closed_id.is_installed()).map(|p| (closed_id, p)),
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (Option<OPENED>, Option<CLOSED>) {
        (self.opened.map(|(_, p)| p), self.closed.map(|(_, p)| p))
    }
}

impl<OPENED, CLOSED> SwitchInput for PinSwitches<OPENED, CLOSED>
where
    OPENED: InputPin,
    CLOSED: InputPin,
{
    fn level(&mut self, pin: PinId) -> Option<Level> {
        if let Some((id, input)) = self.opened.as_mut() {
            if *id == pin {
                return input.is_high().ok().map(Level::from);
            }
        }
        if let Some((id, input)) = self.closed.as_mut() {
            if *id == pin {
                return input.is_high().ok().map(Level::from);
            }
        }
        None
    }
}

/// Last known level of each switch, plus contacts reported by edges that no
/// tick has read yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchCache {
    opened: Option<Level>,
    closed: Option<Level>,
    opened_latched: bool,
    closed_latched: bool,
}

impl SwitchCache {
    /// Cache with nothing known yet.
    pub const fn new() -> Self {
        Self {
            opened: None,
            closed: None,
            opened_latched: false,
            closed_latched: false,
        }
    }

    /// Remember a level.
    pub fn record(&mut self, switch: Switch, level: Level) {
        match switch {
            Switch::Opened => self.opened = Some(level),
            Switch::Closed => self.closed = Some(level),
        }
    }

    /// Last recorded level, if any.
    pub fn level(&self, switch: Switch) -> Option<Level> {
        match switch {
            Switch::Opened => self.opened,
            Switch::Closed => self.closed,
        }
    }

    /// Hold a contact until the next [`take_latched`](Self::take_latched),
    /// whatever later sampling says.
    pub fn latch(&mut self, switch: Switch) {
        match switch {
            Switch::Opened => self.opened_latched = true,
            Switch::Closed => self.closed_latched = true,
        }
    }

    /// Whether a contact was latched since the last call, clearing it.
    pub fn take_latched(&mut self, switch: Switch) -> bool {
        match switch {
            Switch::Opened => core::mem::take(&mut self.opened_latched),
            Switch::Closed => core::mem::take(&mut self.closed_latched),
        }
    }
}
