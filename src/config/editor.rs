//! Admin watermark editor configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CAPACITY_MESSAGE, DEFAULT_WATERMARK_MARGIN};

fn default_capacity_message() -> String {
    DEFAULT_CAPACITY_MESSAGE.to_string()
}

fn default_margin() -> u32 {
    DEFAULT_WATERMARK_MARGIN
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Text of the advisory shown when adding to a full list
    #[serde(default = "default_capacity_message")]
    pub capacity_message: String,
    /// Margin for new watermarks and for entries without one (default: 5)
    #[serde(default = "default_margin")]
    pub default_margin: u32,
    /// New text watermarks start as `© <name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer_name: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            capacity_message: default_capacity_message(),
            default_margin: default_margin(),
            photographer_name: None,
        }
    }
}
