//! # shade-control
//!
//! Motor-actuated shade controller with embedded-hal 1.0 support.
//!
//! A [`Shade`] drives a two-direction, PWM speed-controlled motor toward
//! "open" or "closed" and decides when the move is done, either from a limit
//! switch or from a per-direction time limit.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define shades in TOML files
//! - **embedded-hal 1.0**: `OutputPin` for direction, `SetDutyCycle` for speed,
//!   `InputPin` for limit switches
//! - **no_std compatible**: Core library works without standard library
//! - **Non-blocking**: Motion completion is detected by polling, never by sleeping
//! - **Shared timer count**: Every shade reports outstanding timed moves to one
//!   injected [`PendingTimers`] counter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shade_control::{MotorOutput, PendingTimers, PinSwitches, ShadeBuilder};
//!
//! let config = shade_control::load_config("shades.toml")?;
//! let timers = PendingTimers::new();
//! let shade_config = config.shade("living_room").unwrap();
//!
//! let mut shade = ShadeBuilder::new()
//!     .config(shade_config.clone())
//!     .motor(MotorOutput::from_config(open_pin, close_pin, pwm, shade_config))
//!     .switches(PinSwitches::new(shade_config, opened_sw, closed_sw))
//!     .clock(clock)
//!     .timers(&timers)
//!     .build()?;
//!
//! loop {
//!     shade.poll()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and [`StdClock`]
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Config errors carry heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod macros;

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod gateway;
pub mod motor;
pub mod shade;
pub mod switch;
pub mod system;
pub mod timer;

// Re-exports for ergonomic API
pub use clock::Clock;
pub use config::{validate_config, ShadeConfig, SystemConfig};
pub use error::{Error, Result};
pub use gateway::{Gateway, Projection, Status};
pub use motor::{Command, MotorDrive, MotorOutput};
pub use shade::{Shade, ShadeBuilder, ShadeState};
pub use switch::{ActiveLevel, Edge, Level, PinSwitches, Switch, SwitchInput};
pub use system::ShadeSystem;
pub use timer::{PendingTimers, TimerTracker};

#[cfg(feature = "std")]
pub use clock::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Millis, PinId};
