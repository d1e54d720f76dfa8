//! Partial updates for a watermark entry.

use serde::{Deserialize, Serialize};

use super::item::{check_logo_url, check_opacity, lenient_margin};
use super::{WatermarkError, WatermarkItem, WatermarkKind, WatermarkPosition};

/// A partial update. Absent fields leave the entry untouched.
///
/// There is no `id` field: ids are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<WatermarkKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<WatermarkPosition>,
    #[serde(deserialize_with = "lenient_margin", skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl WatermarkPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: WatermarkKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn position(mut self, position: WatermarkPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the fields this patch sets.
    ///
    /// Content may be blank mid-edit: clearing the text or switching to a
    /// logo before its URL is typed are both accepted. A URL that is set
    /// must have an allowed form.
    pub fn validate(&self, id: &str) -> Result<(), WatermarkError> {
        if let Some(url) = self.logo_url.as_deref().map(str::trim) {
            if !url.is_empty() {
                check_logo_url(id, url)?;
            }
        }
        if let Some(opacity) = self.opacity {
            check_opacity(id, opacity)?;
        }
        Ok(())
    }

    /// The entry with this patch laid over it.
    pub fn apply_to(&self, item: &WatermarkItem) -> WatermarkItem {
        let mut next = item.clone();
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(text) = &self.text {
            next.text = Some(text.clone());
        }
        if let Some(url) = &self.logo_url {
            next.logo_url = Some(url.clone());
        }
        if let Some(opacity) = self.opacity {
            next.opacity = opacity;
        }
        if let Some(position) = self.position {
            next.position = position;
        }
        if let Some(margin) = self.margin {
            next.margin = Some(margin);
        }
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        next
    }
}
