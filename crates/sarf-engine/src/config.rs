// Engine configuration

use serde::{Deserialize, Serialize};

use sarf_store::pattern_table::DEFAULT_CAPACITY;

/// Tunables for a [`MorphologyHandle`](crate::MorphologyHandle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial bucket count of the pattern table. Values below 1 are
    /// raised to 1.
    pub pattern_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pattern_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
