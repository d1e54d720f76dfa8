// Gallery request routing and share-link access

use pis::config::GalleryConfig;
use pis::gallery::*;

fn config() -> GalleryConfig {
    GalleryConfig::default()
}

fn expect_continue(decision: MiddlewareDecision) -> (String, bool, Option<SetCookie>) {
    match decision {
        MiddlewareDecision::Continue {
            locale,
            refresh_session,
            set_cookie,
        } => (locale, refresh_session, set_cookie),
        other => panic!("expected Continue, got {:?}", other),
    }
}

#[test]
fn test_admin_page_refreshes_session_and_resolves_locale() {
    let (locale, refresh, cookie) =
        expect_continue(route_request("/admin/albums", Some("NEXT_LOCALE=en"), &config()));
    assert_eq!(locale, "en");
    assert!(refresh);
    assert!(cookie.is_none());
}

#[test]
fn test_unsupported_cookie_falls_back_and_rewrites() {
    let (locale, refresh, cookie) =
        expect_continue(route_request("/", Some("NEXT_LOCALE=fr; other=1"), &config()));
    assert_eq!(locale, "zh-CN");
    assert!(!refresh);
    let cookie = cookie.unwrap().to_string();
    assert!(cookie.starts_with("NEXT_LOCALE=zh-CN;"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[test]
fn test_public_api_and_assets_pass_through() {
    for path in ["/api/public/albums/abc", "/_next/image", "/robots.txt"] {
        assert_eq!(
            route_request(path, None, &config()),
            MiddlewareDecision::PassThrough,
            "{}",
            path
        );
    }
}

#[test]
fn test_admin_api_is_not_localized() {
    assert_eq!(
        route_request("/api/admin/watermarks", Some("NEXT_LOCALE=en"), &config()),
        MiddlewareDecision::RefreshSession
    );
}

#[test]
fn test_share_link_cookie_blocks_home() {
    let cfg = config();
    let header = format!("theme=dark; {}=true", cfg.share_link_cookie);
    let access = GalleryAccess::from_cookie_header(Some(&header), &cfg.share_link_cookie);
    assert!(access.is_link_restricted());
    assert_eq!(access.home_decision(), HomeDecision::Blocked);
    assert_eq!(access.capabilities(), vec![LINK_RESTRICTED_CAPABILITY]);
}

#[test]
fn test_share_link_cookie_must_be_exactly_true() {
    let cfg = config();
    for value in ["TRUE", "1", "", "yes"] {
        let header = format!("{}={}", cfg.share_link_cookie, value);
        let access = GalleryAccess::from_cookie_header(Some(&header), &cfg.share_link_cookie);
        assert_eq!(access.home_decision(), HomeDecision::Allow, "{}", value);
    }
    let access = GalleryAccess::from_cookie_header(None, &cfg.share_link_cookie);
    assert!(access.capabilities().is_empty());
}

#[test]
fn test_grant_and_clear_share_cookie() {
    let cfg = GalleryConfig {
        share_link_max_age_secs: Some(86400),
        secure_cookies: true,
        ..config()
    };
    let grant = GalleryAccess::grant_cookie(&cfg).to_string();
    assert!(grant.starts_with(&format!("{}=true;", cfg.share_link_cookie)));
    assert!(grant.contains("Max-Age=86400"));
    assert!(grant.contains("Secure"));

    let clear = GalleryAccess::clear_cookie(&cfg).to_string();
    assert!(clear.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
}

#[test]
fn test_cookie_values_are_percent_decoded() {
    assert_eq!(
        cookie_value(Some("a=1; name=hello%20world"), "name").as_deref(),
        Some("hello world")
    );
    assert_eq!(cookie_value(Some("a=1"), "name"), None);
}
