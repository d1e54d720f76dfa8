//! Request routing for locale and admin session handling.

use super::cookie::{cookie_value, SameSite, SetCookie};
use crate::config::GalleryConfig;
use crate::constants::LOCALE_COOKIE_MAX_AGE_SECS;

const ADMIN_API_PREFIX: &str = "/api/admin";
const ADMIN_PREFIX: &str = "/admin";

/// Leading path segments the middleware never touches.
const EXCLUDED_PREFIXES: &[&str] = &["api", "_next", "_vercel"];

/// What the middleware does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiddlewareDecision {
    /// Not matched: static assets, framework internals, public API
    PassThrough,
    /// Admin API call: refresh the session, nothing else
    RefreshSession,
    /// Page request with its resolved locale
    Continue {
        locale: String,
        refresh_session: bool,
        set_cookie: Option<SetCookie>,
    },
}

fn is_admin_api(path: &str) -> bool {
    path == ADMIN_API_PREFIX || path.starts_with("/api/admin/")
}

/// Whether the page matcher skips this path.
pub fn is_excluded_path(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES.iter().any(|p| rest.starts_with(p)) || rest.contains('.')
}

/// The cookie's locale when supported, else the default.
pub fn resolve_locale(cookie: Option<&str>, config: &GalleryConfig) -> String {
    match cookie {
        Some(locale) if config.supports_locale(locale) => locale.to_string(),
        _ => config.default_locale.clone(),
    }
}

pub fn locale_cookie(locale: &str, config: &GalleryConfig) -> SetCookie {
    SetCookie::new(&config.locale_cookie, locale)
        .max_age(LOCALE_COOKIE_MAX_AGE_SECS)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
}

pub fn route_request(
    path: &str,
    cookie_header: Option<&str>,
    config: &GalleryConfig,
) -> MiddlewareDecision {
    if is_admin_api(path) {
        return MiddlewareDecision::RefreshSession;
    }
    if is_excluded_path(path) {
        return MiddlewareDecision::PassThrough;
    }

    let current = cookie_value(cookie_header, &config.locale_cookie);
    let locale = resolve_locale(current.as_deref(), config);

    let set_cookie = if current.as_deref() != Some(locale.as_str()) {
        tracing::debug!(path, locale = %locale, "Setting locale cookie");
        Some(locale_cookie(&locale, config))
    } else {
        None
    };

    MiddlewareDecision::Continue {
        refresh_session: path.starts_with(ADMIN_PREFIX),
        locale,
        set_cookie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GalleryConfig {
        GalleryConfig::default()
    }

    #[test]
    fn test_admin_api_only_refreshes_session() {
        assert_eq!(
            route_request("/api/admin/albums", None, &config()),
            MiddlewareDecision::RefreshSession
        );
        assert_eq!(
            route_request("/api/admin", None, &config()),
            MiddlewareDecision::RefreshSession
        );
    }

    #[test]
    fn test_excluded_paths_pass_through() {
        for path in [
            "/api/public/albums",
            "/_next/static/chunk.js",
            "/_vercel/insights",
            "/favicon.ico",
            "/album/abc/photo.jpg",
        ] {
            assert_eq!(
                route_request(path, None, &config()),
                MiddlewareDecision::PassThrough,
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_missing_cookie_sets_default_locale() {
        let decision = route_request("/album/abc", None, &config());
        let MiddlewareDecision::Continue {
            locale,
            refresh_session,
            set_cookie,
        } = decision
        else {
            panic!("expected Continue");
        };
        assert_eq!(locale, "zh-CN");
        assert!(!refresh_session);
        assert_eq!(
            set_cookie.unwrap().to_string(),
            "NEXT_LOCALE=zh-CN; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }

    #[test]
    fn test_supported_cookie_is_kept() {
        let decision = route_request("/", Some("NEXT_LOCALE=en"), &config());
        assert_eq!(
            decision,
            MiddlewareDecision::Continue {
                locale: "en".to_string(),
                refresh_session: false,
                set_cookie: None,
            }
        );
    }

    #[test]
    fn test_unsupported_cookie_is_replaced() {
        let decision = route_request("/", Some("NEXT_LOCALE=fr"), &config());
        let MiddlewareDecision::Continue { locale, set_cookie, .. } = decision else {
            panic!("expected Continue");
        };
        assert_eq!(locale, "zh-CN");
        assert!(set_cookie.is_some());
    }

    #[test]
    fn test_admin_pages_refresh_session_and_set_locale() {
        let decision = route_request("/admin/albums", None, &config());
        let MiddlewareDecision::Continue {
            refresh_session,
            set_cookie,
            ..
        } = decision
        else {
            panic!("expected Continue");
        };
        assert!(refresh_session);
        assert!(set_cookie.is_some());
    }
}
