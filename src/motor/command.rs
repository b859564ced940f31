//! Motor commands and the driver seam.

use crate::error::Result;

/// Intent sent to the motor outputs.
///
/// Distinct from [`ShadeState`](crate::ShadeState): a command is what the
/// outputs are told to do, the state is what the shade is believed to be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Run toward open.
    Open,
    /// Run toward closed.
    Close,
    /// De-energize both directions.
    #[default]
    Stop,
}

impl Command {
    /// Whether the motor is powered under this command.
    #[inline]
    pub fn energizes(self) -> bool {
        !matches!(self, Command::Stop)
    }

    /// Lower-case name, as used on the text command surface.
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Open => "open",
            Command::Close => "close",
            Command::Stop => "stop",
        }
    }
}

/// Something that can put a motor into the state a [`Command`] asks for.
///
/// Implementations must apply a command as a unit: no reader may ever observe
/// both directions energized.
pub trait MotorDrive {
    /// Apply `command` to the outputs.
    fn drive(&mut self, command: Command) -> Result<()>;
}

impl<M: MotorDrive + ?Sized> MotorDrive for &mut M {
    fn drive(&mut self, command: Command) -> Result<()> {
        (**self).drive(command)
    }
}
