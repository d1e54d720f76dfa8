//! Album page templates applied as reversible style patches.
//!
//! Applying a template writes CSS variables, theme colors, a theme class,
//! data attributes and the body background onto a [`StyleTarget`]. The
//! returned [`AppliedTemplate`] remembers what every touched slot held
//! before, and `revert` puts those values back.
//!
//! # Example
//!
//! ```ignore
//! use pis::style::{find_template, StyleDocument, TemplatePatch};
//!
//! let mut doc = StyleDocument::new();
//! let template = find_template(Some("minimal-light")).unwrap();
//! let applied = TemplatePatch::for_template(template).apply(&mut doc);
//! assert_eq!(doc.data("template"), Some("minimal-light"));
//!
//! applied.revert(&mut doc);
//! assert!(doc.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

static BUILTIN_TEMPLATES: OnceLock<Vec<AlbumTemplate>> = OnceLock::new();

/// Class added to the root when a template uses the light theme.
const LIGHT_CLASS: &str = "light";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTheme {
    pub mode: ThemeMode,
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLayout {
    /// Grid columns on wide screens
    pub columns: u8,
    pub gap_px: u16,
    pub border_radius_px: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateTypography {
    pub heading_font: String,
    pub body_font: String,
}

/// A page theme an album can be published with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub theme: TemplateTheme,
    pub layout: TemplateLayout,
    pub typography: TemplateTypography,
}

/// All builtin templates in display order.
pub fn builtin_templates() -> &'static [AlbumTemplate] {
    BUILTIN_TEMPLATES.get_or_init(|| {
        vec![
            template(
                "classic",
                "Classic",
                "Dark gallery with a warm gold accent",
                TemplateTheme {
                    mode: ThemeMode::Dark,
                    primary_color: "#d4af37".to_string(),
                    background_color: "#0a0a0a".to_string(),
                    text_color: "#f5f5f5".to_string(),
                    accent_color: "#d4af37".to_string(),
                },
                TemplateLayout {
                    columns: 3,
                    gap_px: 8,
                    border_radius_px: 4,
                },
                ("Playfair Display", "Inter"),
            ),
            template(
                "minimal-light",
                "Minimal Light",
                "Bright, airy layout for weddings and portraits",
                TemplateTheme {
                    mode: ThemeMode::Light,
                    primary_color: "#111111".to_string(),
                    background_color: "#ffffff".to_string(),
                    text_color: "#1f1f1f".to_string(),
                    accent_color: "#8c7b6b".to_string(),
                },
                TemplateLayout {
                    columns: 4,
                    gap_px: 12,
                    border_radius_px: 0,
                },
                ("Cormorant Garamond", "Inter"),
            ),
            template(
                "elegant-dark",
                "Elegant Dark",
                "Low-key presentation for editorial work",
                TemplateTheme {
                    mode: ThemeMode::Dark,
                    primary_color: "#e8e0d5".to_string(),
                    background_color: "#151515".to_string(),
                    text_color: "#e8e0d5".to_string(),
                    accent_color: "#b08d57".to_string(),
                },
                TemplateLayout {
                    columns: 2,
                    gap_px: 16,
                    border_radius_px: 2,
                },
                ("Cinzel", "Lato"),
            ),
            template(
                "magazine",
                "Magazine",
                "Dense masonry grid with bold headings",
                TemplateTheme {
                    mode: ThemeMode::Light,
                    primary_color: "#c0392b".to_string(),
                    background_color: "#fafafa".to_string(),
                    text_color: "#222222".to_string(),
                    accent_color: "#c0392b".to_string(),
                },
                TemplateLayout {
                    columns: 5,
                    gap_px: 4,
                    border_radius_px: 0,
                },
                ("Oswald", "Source Sans Pro"),
            ),
        ]
    })
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    theme: TemplateTheme,
    layout: TemplateLayout,
    fonts: (&str, &str),
) -> AlbumTemplate {
    AlbumTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        theme,
        layout,
        typography: TemplateTypography {
            heading_font: fonts.0.to_string(),
            body_font: fonts.1.to_string(),
        },
    }
}

/// Look up a builtin template. Absent or unknown ids yield `None`.
pub fn find_template(id: Option<&str>) -> Option<&'static AlbumTemplate> {
    let id = id.filter(|id| !id.is_empty())?;
    builtin_templates().iter().find(|t| t.id == id)
}

/// CSS custom properties derived from a template's layout and typography.
pub fn template_css_variables(template: &AlbumTemplate) -> Vec<(String, String)> {
    vec![
        (
            "--template-columns".to_string(),
            template.layout.columns.to_string(),
        ),
        (
            "--template-gap".to_string(),
            format!("{}px", template.layout.gap_px),
        ),
        (
            "--template-radius".to_string(),
            format!("{}px", template.layout.border_radius_px),
        ),
        (
            "--template-font-heading".to_string(),
            template.typography.heading_font.clone(),
        ),
        (
            "--template-font-body".to_string(),
            template.typography.body_font.clone(),
        ),
    ]
}

/// An addressable piece of page style state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum StyleSlot {
    /// Inline style property on the root element
    Property(String),
    /// Class on the root element; present is `Some("")`
    Class(String),
    /// `data-*` attribute on the root element
    Data(String),
    /// Inline background color of the body
    BodyBackground,
}

/// Where template styles are written.
pub trait StyleTarget {
    /// Current value of a slot, `None` when unset.
    fn read(&self, slot: &StyleSlot) -> Option<String>;

    /// Set a slot, or clear it when `value` is `None`.
    fn write(&mut self, slot: &StyleSlot, value: Option<&str>);
}

/// In-memory style state of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDocument {
    properties: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    dataset: BTreeMap<String, String>,
    body_background: Option<String>,
}

impl StyleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    pub fn body_background(&self) -> Option<&str> {
        self.body_background.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.classes.is_empty()
            && self.dataset.is_empty()
            && self.body_background.is_none()
    }
}

impl StyleTarget for StyleDocument {
    fn read(&self, slot: &StyleSlot) -> Option<String> {
        match slot {
            StyleSlot::Property(name) => self.properties.get(name).cloned(),
            StyleSlot::Class(name) => self.classes.contains(name).then(String::new),
            StyleSlot::Data(key) => self.dataset.get(key).cloned(),
            StyleSlot::BodyBackground => self.body_background.clone(),
        }
    }

    fn write(&mut self, slot: &StyleSlot, value: Option<&str>) {
        match (slot, value) {
            (StyleSlot::Property(name), Some(v)) => {
                self.properties.insert(name.clone(), v.to_string());
            }
            (StyleSlot::Property(name), None) => {
                self.properties.remove(name);
            }
            (StyleSlot::Class(name), Some(_)) => {
                self.classes.insert(name.clone());
            }
            (StyleSlot::Class(name), None) => {
                self.classes.remove(name);
            }
            (StyleSlot::Data(key), Some(v)) => {
                self.dataset.insert(key.clone(), v.to_string());
            }
            (StyleSlot::Data(key), None) => {
                self.dataset.remove(key);
            }
            (StyleSlot::BodyBackground, v) => {
                self.body_background = v.map(str::to_string);
            }
        }
    }
}

/// The set of writes that applies one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePatch {
    template_id: String,
    changes: Vec<(StyleSlot, Option<String>)>,
}

impl TemplatePatch {
    pub fn for_template(template: &AlbumTemplate) -> Self {
        let mut changes = Vec::new();

        if template.theme.mode == ThemeMode::Light {
            changes.push((StyleSlot::Class(LIGHT_CLASS.to_string()), Some(String::new())));
        }

        for (name, value) in template_css_variables(template) {
            changes.push((StyleSlot::Property(name), Some(value)));
        }

        let theme = &template.theme;
        for (name, value) in [
            ("--template-primary", &theme.primary_color),
            ("--template-bg", &theme.background_color),
            ("--template-text", &theme.text_color),
            ("--template-accent", &theme.accent_color),
        ] {
            changes.push((StyleSlot::Property(name.to_string()), Some(value.clone())));
        }

        changes.push((StyleSlot::BodyBackground, Some(theme.background_color.clone())));
        changes.push((StyleSlot::Data("template".to_string()), Some(template.id.clone())));
        changes.push((
            StyleSlot::Data("template-theme".to_string()),
            Some(theme.mode.as_str().to_string()),
        ));

        Self {
            template_id: template.id.clone(),
            changes,
        }
    }

    /// Patch for a template id; `None` when the id does not name a template.
    pub fn for_template_id(id: Option<&str>) -> Option<Self> {
        find_template(id).map(Self::for_template)
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn changes(&self) -> &[(StyleSlot, Option<String>)] {
        &self.changes
    }

    /// Write the patch, capturing the inverse.
    pub fn apply<T: StyleTarget + ?Sized>(&self, target: &mut T) -> AppliedTemplate {
        let mut inverse = Vec::with_capacity(self.changes.len());
        for (slot, value) in &self.changes {
            inverse.push((slot.clone(), target.read(slot)));
            target.write(slot, value.as_deref());
        }
        inverse.reverse();

        tracing::debug!(
            template = %self.template_id,
            changes = self.changes.len(),
            "Applied album template"
        );

        AppliedTemplate {
            template_id: self.template_id.clone(),
            inverse,
        }
    }
}

/// Handle for an applied template; consumed by `revert`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an applied template should be reverted when the album session ends"]
pub struct AppliedTemplate {
    template_id: String,
    inverse: Vec<(StyleSlot, Option<String>)>,
}

impl AppliedTemplate {
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Restore every slot the template touched to its prior value.
    pub fn revert<T: StyleTarget + ?Sized>(self, target: &mut T) {
        for (slot, value) in &self.inverse {
            target.write(slot, value.as_deref());
        }
        tracing::debug!(template = %self.template_id, "Reverted album template");
    }
}
