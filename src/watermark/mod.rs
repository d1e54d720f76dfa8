//! Watermark module for composing album watermark overlays.
//!
//! An album carries an ordered list of up to six watermark descriptors. The
//! admin editor changes that list through the composer operations, each of
//! which returns a new list, and the preview renderer consumes the overlay
//! descriptors produced by [`preview`].
//!
//! # Features
//!
//! - **Text and logo watermarks** with opacity, anchor and margin
//! - **9 anchor positions**: corners, edge midpoints and center
//! - **List invariants**: at most 6 entries, unique ids, stable order
//! - **Capacity advisory** instead of an error when the list is full
//!
//! # Payload Example
//!
//! ```json
//! [
//!   { "id": "watermark-1", "type": "text", "text": "© Studio",
//!     "opacity": 0.5, "position": "bottom-right", "margin": 5, "enabled": true },
//!   { "id": "watermark-2", "type": "logo", "logoUrl": "https://cdn.example.com/logo.png",
//!     "opacity": 0.8, "position": "top-left", "enabled": false }
//! ]
//! ```

pub mod composer;
pub mod editor;
pub mod error;
pub mod ids;
pub mod item;
pub mod patch;
pub mod position;
pub mod preview;

// Re-export main types for convenience
pub use composer::{
    add, can_add, can_remove, remove, toggle_enabled, update, validate_list, AddOutcome,
    Advisory, AdvisoryKind, ComposerSettings,
};
pub use editor::{AdvisorySink, TracingAdvisorySink, WatermarkEditor};
pub use error::WatermarkError;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use item::{WatermarkItem, WatermarkKind, WatermarkPosition};
pub use patch::WatermarkPatch;
pub use position::{
    calculate_position, clamp_to_bounds, is_visible, ImageDimensions, OverlayDimensions,
    PlacementPosition,
};
pub use preview::{preview, preview_with_margin, OverlayContent, OverlayDescriptor, RenderState};
