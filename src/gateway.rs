//! Text command and status surface.
//!
//! Inbound lines look like `"<name> open"` or `"<name> close"`; only the token
//! after the first space matters. Outbound messages are `"<name> <word>"`.
//! Moving the text is the caller's job.

use core::fmt::Write;

use heapless::String;

use crate::clock::Clock;
use crate::error::{short_name, Result};
use crate::motor::{Command, MotorDrive};
use crate::shade::{Shade, ShadeState};
use crate::switch::{Edge, SwitchInput};

/// Capacity of a status message: a 32 char name, a space and a state word.
pub const STATUS_CAPACITY: usize = 48;

/// Longest state word ("opening", "closing", "unknown").
const MAX_WORD: usize = 7;

/// Room left for the name once a space and the longest word are reserved.
const NAME_CAPACITY: usize = STATUS_CAPACITY - MAX_WORD - 1;

/// How periodic status reports map the five shade states onto words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Projection {
    /// Two-valued legacy report: "open" only when confirmed open, otherwise
    /// "closed". Unknown and moving shades read as closed.
    Coarse,
    /// Every state reported by its own name.
    #[default]
    Full,
}

impl Projection {
    /// Word reported for `state`.
    pub fn word(self, state: ShadeState) -> &'static str {
        match self {
            Projection::Full => state.as_str(),
            Projection::Coarse => match state {
                ShadeState::Open => "open",
                _ => "closed",
            },
        }
    }
}

/// When a status message should go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// Send right away, best effort.
    Immediate,
    /// Queue with the regular outbound traffic.
    Queued,
}

/// Outbound status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// `"<name> <word>"`.
    pub text: String<STATUS_CAPACITY>,
    /// How urgently to send it.
    pub delivery: Delivery,
}

impl Status {
    fn new(name: &str, word: &str, delivery: Delivery) -> Self {
        let name = short_name::<NAME_CAPACITY>(name);
        let mut text = String::new();
        // Cannot overflow: the name is cut to leave room for any word.
        let _ = write!(text, "{} {}", name, word);
        Self { text, delivery }
    }

    /// Message text.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

/// Parse an inbound line into a motion command.
///
/// Returns `None` for anything other than `open` or `close`.
pub fn parse_command(line: &str) -> Option<Command> {
    let token = match line.find(' ') {
        Some(i) => &line[i + 1..],
        None => line,
    };

    match token.trim() {
        "open" => Some(Command::Open),
        "close" => Some(Command::Close),
        _ => None,
    }
}

/// Turns text into shade commands and shade state into text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gateway {
    projection: Projection,
}

impl Gateway {
    /// Gateway reporting with the given projection.
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    /// Projection used for periodic reports.
    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Handle an inbound line.
    ///
    /// Returns an immediate "in transit" status when the command started a
    /// motion, `None` when the line was not a command or the shade rejected it.
    pub fn handle<M, S, C>(&self, shade: &mut Shade<'_, M, S, C>, line: &str) -> Result<Option<Status>>
    where
        M: MotorDrive,
        S: SwitchInput,
        C: Clock,
    {
        let Some(command) = parse_command(line) else {
            debug!("ignoring command line");
            return Ok(None);
        };

        if !shade.issue(command)? {
            return Ok(None);
        }

        Ok(Some(Status::new(
            shade.name(),
            shade.state().as_str(),
            Delivery::Immediate,
        )))
    }

    /// Periodic status report.
    pub fn refresh<M, S, C>(&self, shade: &Shade<'_, M, S, C>) -> Status
    where
        M: MotorDrive,
        S: SwitchInput,
        C: Clock,
    {
        Status::new(
            shade.name(),
            self.projection.word(shade.state()),
            Delivery::Queued,
        )
    }

    /// Status for a poll tick that settled the shade.
    pub fn settled<M, S, C>(
        &self,
        shade: &Shade<'_, M, S, C>,
        resolved: Option<ShadeState>,
    ) -> Option<Status>
    where
        M: MotorDrive,
        S: SwitchInput,
        C: Clock,
    {
        resolved.map(|state| Status::new(shade.name(), self.projection.word(state), Delivery::Queued))
    }

    /// Raw switch edge report: rising reads "closed", falling reads "open".
    ///
    /// Independent of the shade's own state and may disagree with it while
    /// the shade is moving.
    pub fn edge(&self, name: &str, edge: Edge) -> Status {
        let word = match edge {
            Edge::Rising => "closed",
            Edge::Falling => "open",
        };
        Status::new(name, word, Delivery::Queued)
    }
}
