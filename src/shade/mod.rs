//! Shade module for shade-control.
//!
//! Provides the actuator state machine that arbitrates commands, drives the
//! motor and turns switch and timer signals into a definite position.

mod builder;
mod machine;
mod state;

pub use builder::ShadeBuilder;
pub use machine::Shade;
pub use state::ShadeState;
