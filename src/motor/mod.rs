//! Motor module for shade-control.
//!
//! Provides the H-bridge style output driver: two direction pins and one PWM
//! speed pin.

mod command;
mod driver;

pub use command::{Command, MotorDrive};
pub use driver::MotorOutput;
