//! Public gallery configuration: locales and share-link cookies.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOCALE, DEFAULT_LOCALES, DEFAULT_LOCALE_COOKIE, DEFAULT_SHARE_LINK_COOKIE,
};

fn default_locales() -> Vec<String> {
    DEFAULT_LOCALES.iter().map(|l| l.to_string()).collect()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_locale_cookie() -> String {
    DEFAULT_LOCALE_COOKIE.to_string()
}

fn default_share_link_cookie() -> String {
    DEFAULT_SHARE_LINK_COOKIE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Supported locales (default: zh-CN, en)
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    /// Must be one of `locales` (default: zh-CN)
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_locale_cookie")]
    pub locale_cookie: String,
    /// Cookie marking a visitor who arrived through a share link
    #[serde(default = "default_share_link_cookie")]
    pub share_link_cookie: String,
    /// Lifetime of the share-link cookie; session cookie when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_link_max_age_secs: Option<u64>,
    /// Add `Secure` to cookies the gallery sets
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            default_locale: default_locale(),
            locale_cookie: default_locale_cookie(),
            share_link_cookie: default_share_link_cookie(),
            share_link_max_age_secs: None,
            secure_cookies: false,
        }
    }
}

impl GalleryConfig {
    pub fn supports_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}
