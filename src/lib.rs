// PIS Album Delivery Core Library
// Watermark composition, style presets, and the gallery/admin boundary logic around them

pub mod album;
pub mod api;
pub mod audit;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod notifications;
pub mod style;
pub mod watermark;
