//! Error types for shade-control library.
//!
//! Shade *state* anomalies (a switch that never tripped, a rejected command)
//! are not errors: they resolve to a [`ShadeState`](crate::ShadeState). The
//! errors here cover configuration problems and hardware writes that the
//! embedded-hal implementation reports as failed.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all shade-control operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor output error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Shade name not found in configuration
    ShadeNotFound(heapless::String<32>),
    /// Invalid speed percent (must be 1-100)
    InvalidSpeed(u8),
    /// A time limit of zero would expire on the first tick
    ZeroTimeLimit {
        /// Shade name
        shade: heapless::String<32>,
    },
    /// Start state must be open, closed or unknown
    InvalidStartState {
        /// Shade name
        shade: heapless::String<32>,
    },
    /// A required output pin was left at 0
    UnassignedPin {
        /// Shade name
        shade: heapless::String<32>,
    },
    /// The same pin is assigned to more than one role
    PinConflict {
        /// Shade name
        shade: heapless::String<32>,
        /// Pin identifier used twice
        pin: u8,
    },
    /// A builder component was not supplied
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Direction pin operation failed
    PinError,
    /// Speed (PWM) output operation failed
    PwmError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ShadeNotFound(name) => write!(f, "Shade '{}' not found", name),
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed percent: {}. Must be 1-100", v),
            ConfigError::ZeroTimeLimit { shade } => {
                write!(f, "Shade '{}' has a zero time limit", shade)
            }
            ConfigError::InvalidStartState { shade } => {
                write!(f, "Shade '{}' start state must be open, closed or unknown", shade)
            }
            ConfigError::UnassignedPin { shade } => {
                write!(f, "Shade '{}' has an unassigned motor output pin", shade)
            }
            ConfigError::PinConflict { shade, pin } => {
                write!(f, "Shade '{}' assigns pin {} more than once", shade, pin)
            }
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::PwmError => write!(f, "PWM duty cycle update failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

/// Copy a name into a fixed-capacity string, truncating if it does not fit.
pub(crate) fn short_name<const N: usize>(name: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
