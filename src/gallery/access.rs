//! Share-link access gating for the public gallery.
//!
//! A visitor who arrives through an album share link gets a marker cookie.
//! The restriction is read once per request into a [`GalleryAccess`] value
//! and passed to whatever needs it, instead of each page re-reading cookies.

use serde::Serialize;

use super::cookie::{cookie_value, SameSite, SetCookie};
use crate::config::GalleryConfig;

/// Name of the capability carried by a restricted session.
pub const LINK_RESTRICTED_CAPABILITY: &str = "gallery-link-restricted";

const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// What the home page should do for this visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeDecision {
    Allow,
    /// Show the "access restricted" screen with a way back to the album
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryAccess {
    link_restricted: bool,
}

impl GalleryAccess {
    pub fn unrestricted() -> Self {
        Self {
            link_restricted: false,
        }
    }

    pub fn link_restricted() -> Self {
        Self {
            link_restricted: true,
        }
    }

    /// Compute access from the request's `Cookie` header.
    pub fn from_cookie_header(header: Option<&str>, cookie_name: &str) -> Self {
        let link_restricted = cookie_value(header, cookie_name).as_deref() == Some("true");
        Self { link_restricted }
    }

    pub fn is_link_restricted(&self) -> bool {
        self.link_restricted
    }

    /// Capabilities held by this session.
    pub fn capabilities(&self) -> Vec<&'static str> {
        if self.link_restricted {
            vec![LINK_RESTRICTED_CAPABILITY]
        } else {
            Vec::new()
        }
    }

    pub fn home_decision(&self) -> HomeDecision {
        if self.link_restricted {
            HomeDecision::Blocked
        } else {
            HomeDecision::Allow
        }
    }

    /// Cookie set when a share link is opened.
    pub fn grant_cookie(config: &GalleryConfig) -> SetCookie {
        let cookie = SetCookie::new(&config.share_link_cookie, "true")
            .same_site(SameSite::Lax)
            .secure(config.secure_cookies);
        match config.share_link_max_age_secs {
            Some(secs) => cookie.max_age(secs),
            None => cookie,
        }
    }

    /// Cookie that removes the marker, used by the "back to album" action.
    pub fn clear_cookie(config: &GalleryConfig) -> SetCookie {
        SetCookie::new(&config.share_link_cookie, "")
            .expires(EPOCH_HTTP_DATE)
            .secure(config.secure_cookies)
    }
}
