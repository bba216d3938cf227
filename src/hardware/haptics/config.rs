use serde::{Serialize, Deserialize};

use super::HapticError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    /// Number of effect slots a [`HapticDevice`](super::HapticDevice) hands out.
    pub max_effects: usize,
    /// Level passed to [`Logger::start`](crate::hardware::Logger::start), `Warn` when unset.
    pub log_level: Option<log::Level>,
}

impl Default for HapticConfig {
    fn default() -> Self {
        HapticConfig{max_effects: 32, log_level: None}
    }
}

impl HapticConfig {
    pub fn from_json(json: &str) -> Result<Self, HapticError> {
        Ok(serde_json::from_str(json)?)
    }
}
