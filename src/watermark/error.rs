//! Watermark error types.
//!
//! These are caller-validation failures: the editor checks each patch's
//! fields before applying it and the whole entry at save time, and the album
//! API checks list shape before persisting. The composer operations never
//! return them.

use std::fmt;

/// Errors found while validating watermark descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkError {
    /// Text watermark without text
    EmptyText { id: String },

    /// Logo watermark without a logo URL
    MissingLogoUrl { id: String },

    /// Logo URL with an unsupported scheme
    InvalidLogoUrl { id: String, url: String },

    /// Opacity outside 0.0..=1.0 or not finite
    InvalidOpacity { id: String, opacity: f32 },

    /// List longer than the supported maximum
    TooMany { count: usize, max: usize },

    /// Two entries share an id
    DuplicateId { id: String },
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText { id } => {
                write!(f, "Watermark '{}': text watermark requires non-empty text", id)
            }
            Self::MissingLogoUrl { id } => {
                write!(f, "Watermark '{}': logo watermark requires a logo URL", id)
            }
            Self::InvalidLogoUrl { id, url } => write!(
                f,
                "Watermark '{}': logo URL must be https:// or a site path, got '{}'",
                id, url
            ),
            Self::InvalidOpacity { id, opacity } => write!(
                f,
                "Watermark '{}': opacity must be a finite value between 0.0 and 1.0, got {}",
                id, opacity
            ),
            Self::TooMany { count, max } => {
                write!(f, "At most {} watermarks are supported, got {}", max, count)
            }
            Self::DuplicateId { id } => write!(f, "Duplicate watermark id '{}'", id),
        }
    }
}

impl std::error::Error for WatermarkError {}
