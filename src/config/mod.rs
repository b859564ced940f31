//! Configuration module for shade-control.
//!
//! Provides types for loading and validating shade configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod shade;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use shade::ShadeConfig;
pub use system::{SystemConfig, MAX_SHADES};
pub use validation::{validate_config, validate_shade};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millis, PinId};
