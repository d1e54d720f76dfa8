//! Style module for album color-grade presets and page templates.
//!
//! Two independent pieces live here:
//!
//! - **Presets**: a versioned registry of named looks ("film-portrait",
//!   "black-white", ...) that resolve to a CSS `filter` chain used by the
//!   preview renderer.
//! - **Templates**: album page themes applied to a style target as an
//!   explicit apply/revert pair.
//!
//! # Configuration Example
//!
//! Extra presets are plain registry entries:
//!
//! ```yaml
//! style_presets:
//!   - id: "soft-matte"
//!     name: "Soft Matte"
//!     category: portrait
//!     contrast: 0.85
//!     brightness: 1.05
//! ```

pub mod preset;
pub mod resolver;
pub mod template;

// Re-export main types for convenience
pub use preset::{FilterAdjustments, FilterTerm, PresetCategory, PresetRegistry, StylePreset};
pub use resolver::{resolve_filter, StylePresetConfig};
pub use template::{
    builtin_templates, find_template, template_css_variables, AlbumTemplate, AppliedTemplate,
    StyleDocument, StyleSlot, StyleTarget, TemplatePatch, ThemeMode,
};
