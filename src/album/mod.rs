//! Album payloads exchanged with the admin API.
//!
//! Watermark lists and style preset selections are stored verbatim; the only
//! server-side checks are on the album's own fields and on watermark list
//! shape. Watermark entries are kept as raw JSON and parsed only to check the
//! list or to render it.

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::constants::MAX_ALBUM_TITLE_LENGTH;
use crate::style::{PresetRegistry, StylePresetConfig};
use crate::watermark::{preview_with_margin, validate_list, RenderState, WatermarkItem};

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::validation("Album title is required")
            .with_details(serde_json::json!({"field": "title"})));
    }
    if title.trim().chars().count() > MAX_ALBUM_TITLE_LENGTH {
        return Err(ApiError::validation(format!(
            "Album title must be at most {} characters",
            MAX_ALBUM_TITLE_LENGTH
        ))
        .with_details(serde_json::json!({"field": "title"})));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A watermark list exactly as the client sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredWatermarks(Vec<serde_json::Value>);

impl StoredWatermarks {
    pub fn from_items(items: &[WatermarkItem]) -> Result<Self, ApiError> {
        items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|e| ApiError::internal(e.to_string()))
    }

    /// Parse every entry into a typed descriptor.
    pub fn items(&self) -> Result<Vec<WatermarkItem>, ApiError> {
        self.0
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                WatermarkItem::deserialize(raw).map_err(|e| {
                    ApiError::validation(format!("Invalid watermark entry: {}", e))
                        .with_details(serde_json::json!({"field": "watermarks", "index": index}))
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of `POST /api/admin/albums`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "templateId", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, alias = "stylePreset", skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<StylePresetConfig>,
}

impl CreateAlbumRequest {
    /// Validate and normalize: title trimmed, blank optionals dropped.
    pub fn validate(self) -> Result<Self, ApiError> {
        validate_title(&self.title)?;

        Ok(Self {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            template_id: non_blank(self.template_id),
            style_preset: self.style_preset,
        })
    }
}

/// Body of `PATCH /api/admin/albums/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "watermarkEnabled", skip_serializing_if = "Option::is_none")]
    pub watermark_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermarks: Option<StoredWatermarks>,
    #[serde(alias = "stylePreset", skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<StylePresetConfig>,
    #[serde(alias = "templateId", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl AlbumUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(watermarks) = &self.watermarks {
            validate_list(&watermarks.items()?)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this update sets, for audit details.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.watermark_enabled.is_some() {
            fields.push("watermark_enabled");
        }
        if self.watermarks.is_some() {
            fields.push("watermarks");
        }
        if self.style_preset.is_some() {
            fields.push("style_preset");
        }
        if self.template_id.is_some() {
            fields.push("template_id");
        }
        fields
    }
}

/// The parts of a stored album the preview needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true", alias = "watermarkEnabled")]
    pub watermark_enabled: bool,
    #[serde(default)]
    pub watermarks: StoredWatermarks,
    #[serde(default, alias = "stylePreset", skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<StylePresetConfig>,
    #[serde(default, alias = "templateId", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl AlbumRecord {
    /// Overlays to draw; nothing when watermarking is off for the album or
    /// the stored list no longer parses.
    pub fn render_state(&self, default_margin: u32) -> RenderState {
        if !self.watermark_enabled {
            return RenderState::NoWatermark;
        }
        match self.watermarks.items() {
            Ok(items) => preview_with_margin(&items, default_margin),
            Err(err) => {
                tracing::warn!(
                    album = self.id.as_deref().unwrap_or("-"),
                    error = %err.message(),
                    "Stored watermark list is unreadable"
                );
                RenderState::NoWatermark
            }
        }
    }

    pub fn filter(&self, registry: &PresetRegistry) -> String {
        registry.resolve(self.style_preset.as_ref())
    }

    /// Apply an update that has already been validated.
    pub fn apply(&mut self, update: AlbumUpdate) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if update.description.is_some() {
            self.description = non_blank(update.description);
        }
        if let Some(enabled) = update.watermark_enabled {
            self.watermark_enabled = enabled;
        }
        if let Some(watermarks) = update.watermarks {
            self.watermarks = watermarks;
        }
        if let Some(style_preset) = update.style_preset {
            self.style_preset = Some(style_preset);
        }
        if let Some(template_id) = update.template_id {
            self.template_id = Some(template_id);
        }
    }
}
