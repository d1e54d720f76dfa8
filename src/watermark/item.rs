//! Watermark descriptor types.
//!
//! A descriptor is stored flat, in the shape the admin editor sends it:
//! `type` selects which of `text` / `logoUrl` is meaningful, the other is
//! simply ignored. Keeping the flat shape lets a type switch in the editor
//! preserve what the user already typed.

use serde::{Deserialize, Deserializer, Serialize};

use super::WatermarkError;
use crate::constants::DEFAULT_WATERMARK_OPACITY;

fn default_opacity() -> f32 {
    DEFAULT_WATERMARK_OPACITY
}

fn default_enabled() -> bool {
    true
}

/// Accept any JSON number as a pixel margin: rounded, negatives become 0.
pub(crate) fn lenient_margin<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| n.as_f64()).map(|m| m.round() as u32))
}

/// Allowed logo URL forms: https URLs and site-relative paths.
const ALLOWED_LOGO_PREFIXES: &[&str] = &["https://", "/"];

pub(crate) fn check_logo_url(id: &str, url: &str) -> Result<(), WatermarkError> {
    if !ALLOWED_LOGO_PREFIXES.iter().any(|p| url.starts_with(p)) || url.starts_with("//") {
        return Err(WatermarkError::InvalidLogoUrl {
            id: id.to_string(),
            url: url.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_opacity(id: &str, opacity: f32) -> Result<(), WatermarkError> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(WatermarkError::InvalidOpacity {
            id: id.to_string(),
            opacity,
        });
    }
    Ok(())
}

/// Horizontal or vertical alignment of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Watermark anchor on the image (3x3 grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkPosition {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl WatermarkPosition {
    pub const ALL: [WatermarkPosition; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// (horizontal, vertical) alignment.
    pub fn alignment(&self) -> (Align, Align) {
        match self {
            Self::TopLeft => (Align::Start, Align::Start),
            Self::TopCenter => (Align::Center, Align::Start),
            Self::TopRight => (Align::End, Align::Start),
            Self::CenterLeft => (Align::Start, Align::Center),
            Self::Center => (Align::Center, Align::Center),
            Self::CenterRight => (Align::End, Align::Center),
            Self::BottomLeft => (Align::Start, Align::End),
            Self::BottomCenter => (Align::Center, Align::End),
            Self::BottomRight => (Align::End, Align::End),
        }
    }
}

/// Watermark variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkKind {
    #[default]
    Text,
    Logo,
}

/// One watermark in an album's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkItem {
    /// Unique within the owning list, never changed after creation
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: WatermarkKind,

    /// Required when `kind` is `Text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Required when `kind` is `Logo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    /// Opacity from 0.0 (transparent) to 1.0 (opaque) (default: 0.5)
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    #[serde(default)]
    pub position: WatermarkPosition,

    /// Pixel offset from the anchor; the renderer supplies a default
    #[serde(
        default,
        deserialize_with = "lenient_margin",
        skip_serializing_if = "Option::is_none"
    )]
    pub margin: Option<u32>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Fields this crate does not interpret, carried through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WatermarkItem {
    /// A text watermark with default opacity and placement.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: WatermarkKind::Text,
            text: Some(text.into()),
            logo_url: None,
            opacity: DEFAULT_WATERMARK_OPACITY,
            position: WatermarkPosition::default(),
            margin: None,
            enabled: true,
            extra: serde_json::Map::new(),
        }
    }

    /// A logo watermark with default opacity and placement.
    pub fn logo(id: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: WatermarkKind::Logo,
            text: None,
            logo_url: Some(logo_url.into()),
            opacity: DEFAULT_WATERMARK_OPACITY,
            position: WatermarkPosition::default(),
            margin: None,
            enabled: true,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_position(mut self, position: WatermarkPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Text or URL for the active variant, if set and non-blank.
    pub fn content(&self) -> Option<&str> {
        let value = match self.kind {
            WatermarkKind::Text => self.text.as_deref(),
            WatermarkKind::Logo => self.logo_url.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Validate the complete descriptor, content included.
    ///
    /// Run at save time. While editing, only the fields a patch touches are
    /// checked; see `WatermarkPatch::validate`.
    pub fn validate(&self) -> Result<(), WatermarkError> {
        match self.kind {
            WatermarkKind::Text => {
                if self.content().is_none() {
                    return Err(WatermarkError::EmptyText {
                        id: self.id.clone(),
                    });
                }
            }
            WatermarkKind::Logo => {
                let Some(url) = self.content() else {
                    return Err(WatermarkError::MissingLogoUrl {
                        id: self.id.clone(),
                    });
                };
                check_logo_url(&self.id, url)?;
            }
        }

        check_opacity(&self.id, self.opacity)
    }
}
