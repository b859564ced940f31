//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::shade::ShadeConfig;

/// Maximum number of shades in one configuration.
pub const MAX_SHADES: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Named shade configurations.
    pub shades: FnvIndexMap<String<32>, ShadeConfig, MAX_SHADES>,
}

impl SystemConfig {
    /// Get a shade configuration by name.
    pub fn shade(&self, name: &str) -> Option<&ShadeConfig> {
        self.shades
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all shade names.
    pub fn shade_names(&self) -> impl Iterator<Item = &str> {
        self.shades.keys().map(|s| s.as_str())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            shades: FnvIndexMap::new(),
        }
    }
}
