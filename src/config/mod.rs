// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::constants::{DEFAULT_NOTIFICATION_PAGE_SIZE, MAX_NOTIFICATION_PAGE_SIZE};
use crate::style::{PresetRegistry, StylePreset};

pub mod audit;
pub mod editor;
pub mod gallery;
pub mod jwt;
pub mod server;

pub use audit::{AuditLogConfig, AuditLogLevel};
pub use editor::EditorConfig;
pub use gallery::GalleryConfig;
pub use jwt::{JwtConfig, VALID_ALGORITHMS};
pub use server::{LogFormat, LoggingConfig, ServerConfig};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: JwtConfig,
    pub gallery: GalleryConfig,
    pub editor: EditorConfig,
    /// Presets added to (or replacing) the builtin registry entries
    pub style_presets: Vec<StylePreset>,
    pub notifications: NotificationsConfig,
    pub audit_log: AuditLogConfig,
}

fn default_page_size() -> usize {
    DEFAULT_NOTIFICATION_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    MAX_NOTIFICATION_PAGE_SIZE
}

/// Paging limits for notification history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Cookie names are HTTP tokens: no separators, whitespace or controls.
fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
        })
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        if substituted.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.address.trim().is_empty() {
            return Err("Server address cannot be empty".to_string());
        }

        // Each directive is `level` or `target=level`
        for directive in self.logging.level.split(',').map(str::trim) {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            if !VALID_LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ));
            }
        }

        // Auth: an enabled gate needs a usable secret
        if self.auth.enabled && self.auth.secret.is_empty() {
            return Err("JWT is enabled but secret is empty".to_string());
        }
        if !VALID_ALGORITHMS.contains(&self.auth.algorithm.as_str()) {
            return Err(format!(
                "Invalid JWT algorithm '{}'. Must be one of: {}",
                self.auth.algorithm,
                VALID_ALGORITHMS.join(", ")
            ));
        }
        if self.auth.admin_role.trim().is_empty() {
            return Err("JWT admin_role cannot be empty".to_string());
        }

        // Gallery
        if self.gallery.locales.is_empty() {
            return Err("Gallery must define at least one locale".to_string());
        }
        let mut seen_locales = HashSet::new();
        for locale in &self.gallery.locales {
            if locale.trim().is_empty() {
                return Err("Gallery locale cannot be empty".to_string());
            }
            if !seen_locales.insert(locale.as_str()) {
                return Err(format!("Duplicate gallery locale '{}'", locale));
            }
        }
        if !self.gallery.supports_locale(&self.gallery.default_locale) {
            return Err(format!(
                "Default locale '{}' is not in the configured locales",
                self.gallery.default_locale
            ));
        }
        for (field, name) in [
            ("locale_cookie", &self.gallery.locale_cookie),
            ("share_link_cookie", &self.gallery.share_link_cookie),
        ] {
            if !is_valid_cookie_name(name) {
                return Err(format!("Gallery {} '{}' is not a valid cookie name", field, name));
            }
        }

        // Editor
        if self.editor.capacity_message.trim().is_empty() {
            return Err("Editor capacity_message cannot be empty".to_string());
        }

        // Style presets
        let mut seen_presets = HashSet::new();
        for preset in &self.style_presets {
            preset.validate()?;
            if !seen_presets.insert(preset.id.as_str()) {
                return Err(format!("Duplicate style preset id '{}'", preset.id));
            }
        }

        // Notifications
        let paging = &self.notifications;
        if paging.max_page_size == 0 {
            return Err("Notifications max_page_size must be > 0".to_string());
        }
        if paging.default_page_size == 0 || paging.default_page_size > paging.max_page_size {
            return Err(format!(
                "Notifications default_page_size {} must be between 1 and max_page_size {}",
                paging.default_page_size, paging.max_page_size
            ));
        }

        Ok(())
    }

    /// Builtin presets plus the configured entries.
    pub fn preset_registry(&self) -> PresetRegistry {
        PresetRegistry::with_entries(&self.style_presets)
    }
}
