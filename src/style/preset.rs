//! Named style presets and the registry that holds them.
//!
//! Every preset is a set of coefficients over a fixed, ordered list of CSS
//! filter functions. Rendering emits only the non-identity terms, always in
//! the same order, so a preset name maps to exactly one filter string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::constants::{NEUTRAL_FILTER, PRESET_REGISTRY_VERSION};

static BUILTIN_REGISTRY: OnceLock<PresetRegistry> = OnceLock::new();

/// Grouping used by the admin preset picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Portrait,
    Landscape,
    #[default]
    General,
}

/// One CSS filter function with its argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterTerm {
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    Grayscale(f64),
    Sepia(f64),
    /// Degrees
    HueRotate(f64),
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness(v) => write!(f, "brightness({})", v),
            Self::Contrast(v) => write!(f, "contrast({})", v),
            Self::Saturate(v) => write!(f, "saturate({})", v),
            Self::Grayscale(v) => write!(f, "grayscale({})", v),
            Self::Sepia(v) => write!(f, "sepia({})", v),
            Self::HueRotate(v) => write!(f, "hue-rotate({}deg)", v),
        }
    }
}

/// Filter coefficients. Omitted fields take the identity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterAdjustments {
    pub brightness: f64,
    pub contrast: f64,
    pub saturate: f64,
    pub grayscale: f64,
    pub sepia: f64,
    pub hue_rotate: f64,
}

impl Default for FilterAdjustments {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturate: 1.0,
            grayscale: 0.0,
            sepia: 0.0,
            hue_rotate: 0.0,
        }
    }
}

fn differs(value: f64, identity: f64) -> bool {
    (value - identity).abs() > f64::EPSILON
}

impl FilterAdjustments {
    /// Non-identity terms in canonical order.
    pub fn terms(&self) -> Vec<FilterTerm> {
        let mut terms = Vec::with_capacity(6);
        if differs(self.brightness, 1.0) {
            terms.push(FilterTerm::Brightness(self.brightness));
        }
        if differs(self.contrast, 1.0) {
            terms.push(FilterTerm::Contrast(self.contrast));
        }
        if differs(self.saturate, 1.0) {
            terms.push(FilterTerm::Saturate(self.saturate));
        }
        if differs(self.grayscale, 0.0) {
            terms.push(FilterTerm::Grayscale(self.grayscale));
        }
        if differs(self.sepia, 0.0) {
            terms.push(FilterTerm::Sepia(self.sepia));
        }
        if differs(self.hue_rotate, 0.0) {
            terms.push(FilterTerm::HueRotate(self.hue_rotate));
        }
        terms
    }

    pub fn is_identity(&self) -> bool {
        self.terms().is_empty()
    }

    /// Render as a CSS `filter` value, `"none"` for the identity.
    pub fn to_css(&self) -> String {
        let terms = self.terms();
        if terms.is_empty() {
            return NEUTRAL_FILTER.to_string();
        }
        terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn validate(&self) -> Result<(), String> {
        let all = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturate", self.saturate),
            ("grayscale", self.grayscale),
            ("sepia", self.sepia),
            ("hue_rotate", self.hue_rotate),
        ];
        for (name, value) in all {
            if !value.is_finite() {
                return Err(format!("{} must be a finite value, got {}", name, value));
            }
        }
        for (name, value) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturate", self.saturate),
        ] {
            if value < 0.0 {
                return Err(format!("{} must not be negative, got {}", name, value));
            }
        }
        for (name, value) in [("grayscale", self.grayscale), ("sepia", self.sepia)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// A named look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: PresetCategory,
    #[serde(flatten)]
    pub adjustments: FilterAdjustments,
}

impl StylePreset {
    pub fn filter(&self) -> String {
        self.adjustments.to_css()
    }

    /// Validate a registry entry.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Style preset 'id' cannot be empty".to_string());
        }
        if self.id == NEUTRAL_FILTER {
            return Err(format!(
                "Style preset id '{}' is reserved for the neutral filter",
                NEUTRAL_FILTER
            ));
        }
        self.adjustments
            .validate()
            .map_err(|e| format!("Style preset '{}': {}", self.id, e))?;
        if self.adjustments.is_identity() {
            return Err(format!(
                "Style preset '{}' has no adjustments and would render as '{}'",
                self.id, NEUTRAL_FILTER
            ));
        }
        Ok(())
    }
}

/// Versioned mapping from preset id to filter coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRegistry {
    version: u32,
    presets: Vec<StylePreset>,
}

impl PresetRegistry {
    /// The builtin registry shared by every caller.
    pub fn builtin() -> &'static PresetRegistry {
        BUILTIN_REGISTRY.get_or_init(|| PresetRegistry {
            version: PRESET_REGISTRY_VERSION,
            presets: builtin_presets(),
        })
    }

    /// Builtin presets followed by `extra`; an extra entry with a builtin
    /// id replaces the builtin one in place.
    pub fn with_entries(extra: &[StylePreset]) -> Self {
        let mut registry = Self::builtin().clone();
        for entry in extra {
            registry.insert(entry.clone());
        }
        registry
    }

    fn insert(&mut self, entry: StylePreset) {
        match self.presets.iter_mut().find(|p| p.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.presets.push(entry),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&StylePreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn presets(&self) -> &[StylePreset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn preset(id: &str, name: &str, category: PresetCategory, adjustments: FilterAdjustments) -> StylePreset {
    StylePreset {
        id: id.to_string(),
        name: name.to_string(),
        category,
        adjustments,
    }
}

fn builtin_presets() -> Vec<StylePreset> {
    use PresetCategory::{General, Landscape, Portrait};
    let base = FilterAdjustments::default();

    vec![
        preset(
            "japanese-fresh",
            "Japanese Fresh",
            Portrait,
            FilterAdjustments {
                brightness: 1.1,
                contrast: 0.9,
                saturate: 0.85,
                ..base
            },
        ),
        preset(
            "film-portrait",
            "Film Portrait",
            Portrait,
            FilterAdjustments {
                brightness: 1.02,
                contrast: 1.1,
                saturate: 0.9,
                sepia: 0.15,
                ..base
            },
        ),
        preset(
            "cinematic-portrait",
            "Cinematic Portrait",
            Portrait,
            FilterAdjustments {
                brightness: 0.95,
                contrast: 1.15,
                saturate: 0.8,
                hue_rotate: -8.0,
                ..base
            },
        ),
        preset(
            "realistic-portrait",
            "Realistic Portrait",
            Portrait,
            FilterAdjustments {
                contrast: 1.05,
                saturate: 1.05,
                ..base
            },
        ),
        preset(
            "warm-portrait",
            "Warm Portrait",
            Portrait,
            FilterAdjustments {
                brightness: 1.05,
                saturate: 1.1,
                sepia: 0.2,
                ..base
            },
        ),
        preset(
            "natural-landscape",
            "Natural Landscape",
            Landscape,
            FilterAdjustments {
                contrast: 1.05,
                saturate: 1.15,
                ..base
            },
        ),
        preset(
            "cinematic-landscape",
            "Cinematic Landscape",
            Landscape,
            FilterAdjustments {
                brightness: 0.95,
                contrast: 1.2,
                saturate: 0.85,
                hue_rotate: 10.0,
                ..base
            },
        ),
        preset(
            "film-landscape",
            "Film Landscape",
            Landscape,
            FilterAdjustments {
                contrast: 1.08,
                saturate: 0.9,
                sepia: 0.12,
                ..base
            },
        ),
        preset(
            "vibrant-landscape",
            "Vibrant Landscape",
            Landscape,
            FilterAdjustments {
                brightness: 1.05,
                contrast: 1.1,
                saturate: 1.35,
                ..base
            },
        ),
        preset(
            "golden-hour",
            "Golden Hour",
            General,
            FilterAdjustments {
                brightness: 1.08,
                saturate: 1.2,
                sepia: 0.3,
                hue_rotate: -10.0,
                ..base
            },
        ),
        preset(
            "black-white",
            "Black & White",
            General,
            FilterAdjustments {
                contrast: 1.2,
                grayscale: 1.0,
                ..base
            },
        ),
        preset(
            "vintage",
            "Vintage",
            General,
            FilterAdjustments {
                brightness: 0.95,
                contrast: 0.9,
                saturate: 0.7,
                sepia: 0.4,
                ..base
            },
        ),
        preset(
            "cool",
            "Cool",
            General,
            FilterAdjustments {
                brightness: 1.02,
                saturate: 0.95,
                hue_rotate: 15.0,
                ..base
            },
        ),
    ]
}
