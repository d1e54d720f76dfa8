//! Public gallery request policy: locale cookies, admin session refresh and
//! share-link access gating.

pub mod access;
pub mod cookie;
pub mod locale;

pub use access::{GalleryAccess, HomeDecision, LINK_RESTRICTED_CAPABILITY};
pub use cookie::{cookie_value, parse_cookie_header, SameSite, SetCookie};
pub use locale::{
    is_excluded_path, locale_cookie, resolve_locale, route_request, MiddlewareDecision,
};
