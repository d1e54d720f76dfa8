//! Resolution of an album's style preset selection into a CSS filter.
//!
//! Resolution fails open: anything that does not name a registered preset
//! yields the neutral filter `"none"` so a broken reference never blocks
//! image display.

use serde::{Deserialize, Serialize};

use super::preset::PresetRegistry;
use crate::constants::NEUTRAL_FILTER;

/// Style preset selection stored on an album record.
///
/// Fields other than `preset` are carried through untouched so the record
/// round-trips verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylePresetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StylePresetConfig {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: Some(preset.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// The selected preset id, `None` when absent, empty or `"none"`.
    pub fn preset_id(&self) -> Option<&str> {
        self.preset
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != NEUTRAL_FILTER)
    }
}

impl PresetRegistry {
    /// Resolve a selection against this registry.
    pub fn resolve(&self, config: Option<&StylePresetConfig>) -> String {
        let Some(id) = config.and_then(StylePresetConfig::preset_id) else {
            return NEUTRAL_FILTER.to_string();
        };

        match self.get(id) {
            Some(preset) => preset.filter(),
            None => {
                tracing::debug!(preset = %id, "Unknown style preset, using neutral filter");
                NEUTRAL_FILTER.to_string()
            }
        }
    }
}

/// Resolve a selection against the builtin registry.
pub fn resolve_filter(config: Option<&StylePresetConfig>) -> String {
    PresetRegistry::builtin().resolve(config)
}
