// Constants module - centralized default values for configuration
//
// This module defines the default values used throughout the codebase.
// Anything a deployment may reasonably tune is also exposed through
// `crate::config`; the values here are what an empty config resolves to.

// =============================================================================
// Server defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Watermark editor defaults
// =============================================================================

/// Maximum number of watermarks an album may carry
pub const MAX_WATERMARKS: usize = 6;

/// Minimum list length at which removal is offered
pub const MIN_WATERMARKS_FOR_REMOVAL: usize = 2;

/// Opacity given to newly added watermarks
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.5;

/// Margin in pixels applied when a watermark does not set one
pub const DEFAULT_WATERMARK_MARGIN: u32 = 5;

/// Advisory shown when an add is attempted at capacity
pub const DEFAULT_CAPACITY_MESSAGE: &str = "At most 6 watermarks are supported";

/// Prefix for generated watermark ids
pub const WATERMARK_ID_PREFIX: &str = "watermark";

// =============================================================================
// Style preset defaults
// =============================================================================

/// Neutral CSS filter value
pub const NEUTRAL_FILTER: &str = "none";

/// Version of the builtin preset registry
pub const PRESET_REGISTRY_VERSION: u32 = 1;

// =============================================================================
// Gallery defaults
// =============================================================================

/// Cookie carrying the visitor's locale
pub const DEFAULT_LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Locale used when the cookie is absent or unsupported
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Locales the gallery is translated into
pub const DEFAULT_LOCALES: &[&str] = &["zh-CN", "en"];

/// Locale cookie lifetime (1 year)
pub const LOCALE_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Cookie set when a visitor arrives through an album share link
pub const DEFAULT_SHARE_LINK_COOKIE: &str = "pis_share_link_access";

// =============================================================================
// Auth defaults
// =============================================================================

/// Role name granting admin access
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

/// Role assumed when a token carries none
pub const DEFAULT_USER_ROLE: &str = "user";

// =============================================================================
// Notification defaults
// =============================================================================

/// Default page size for notification history
pub const DEFAULT_NOTIFICATION_PAGE_SIZE: usize = 20;

/// Upper bound for notification page size
pub const MAX_NOTIFICATION_PAGE_SIZE: usize = 100;

/// Default SMTP submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Port that implies implicit TLS
pub const SMTPS_PORT: u16 = 465;

/// Placeholder returned instead of a stored SMTP password
pub const PASSWORD_PLACEHOLDER: &str = "******";

// =============================================================================
// Album defaults
// =============================================================================

/// Maximum album title length in characters
pub const MAX_ALBUM_TITLE_LENGTH: usize = 200;
