//! Shade position states.

use serde::Deserialize;

use crate::motor::Command;

/// What the controller believes the shade is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ShadeState {
    /// Motor off, position not confirmed.
    #[default]
    Unknown,
    /// Motor off, fully open.
    Open,
    /// Motor running toward open.
    Opening,
    /// Motor off, fully closed.
    Closed,
    /// Motor running toward closed.
    Closing,
}

impl ShadeState {
    /// Motor energized, completion not yet confirmed.
    #[inline]
    pub fn is_transient(self) -> bool {
        matches!(self, ShadeState::Opening | ShadeState::Closing)
    }

    /// Motor de-energized.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_transient()
    }

    /// State a transient state settles in when it completes normally.
    pub fn completed(self) -> Option<ShadeState> {
        match self {
            ShadeState::Opening => Some(ShadeState::Open),
            ShadeState::Closing => Some(ShadeState::Closed),
            _ => None,
        }
    }

    /// Command that moves the shade toward this state, for terminal positions.
    pub fn approach(self) -> Option<Command> {
        match self {
            ShadeState::Open => Some(Command::Open),
            ShadeState::Closed => Some(Command::Close),
            _ => None,
        }
    }

    /// Lower-case name, as used in status messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ShadeState::Unknown => "unknown",
            ShadeState::Open => "open",
            ShadeState::Opening => "opening",
            ShadeState::Closed => "closed",
            ShadeState::Closing => "closing",
        }
    }
}
