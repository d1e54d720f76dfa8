//! Pixel placement for watermark overlays.
//!
//! The preview renderer knows the image size and the rendered size of each
//! overlay; these helpers turn an anchor plus margin into top-left pixel
//! coordinates.
//!
//! # Example
//!
//! ```ignore
//! use pis::watermark::{calculate_position, ImageDimensions, OverlayDimensions, WatermarkPosition};
//!
//! let image = ImageDimensions { width: 800, height: 600 };
//! let overlay = OverlayDimensions { width: 100, height: 50 };
//!
//! let pos = calculate_position(WatermarkPosition::BottomRight, &image, &overlay, 10);
//! assert_eq!((pos.x, pos.y), (690, 540)); // 800 - 100 - 10, 600 - 50 - 10
//! ```

use super::item::Align;
use super::WatermarkPosition;

/// Dimensions of the target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the rendered overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner of an overlay on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Offset along one axis for an alignment.
///
/// Computed in `i64`; the result saturates to the `i32` range.
fn axis_offset(align: Align, extent: u32, size: u32, margin: u32) -> i32 {
    let (extent, size, margin) = (i64::from(extent), i64::from(size), i64::from(margin));
    saturate(match align {
        Align::Start => margin,
        Align::Center => (extent - size) / 2,
        Align::End => extent - size - margin,
    })
}

/// Calculate where an overlay goes for an anchor and margin.
///
/// The margin is ignored on a centered axis. Coordinates may be negative
/// when the overlay is larger than the image; see [`clamp_to_bounds`].
pub fn calculate_position(
    position: WatermarkPosition,
    image: &ImageDimensions,
    overlay: &OverlayDimensions,
    margin: u32,
) -> PlacementPosition {
    let (horizontal, vertical) = position.alignment();
    PlacementPosition::new(
        axis_offset(horizontal, image.width, overlay.width, margin),
        axis_offset(vertical, image.height, overlay.height, margin),
    )
}

/// Clamp a position so the overlay stays inside the image where possible.
pub fn clamp_to_bounds(
    pos: PlacementPosition,
    image: &ImageDimensions,
    overlay: &OverlayDimensions,
) -> PlacementPosition {
    let max_x = saturate((i64::from(image.width) - i64::from(overlay.width)).max(0));
    let max_y = saturate((i64::from(image.height) - i64::from(overlay.height)).max(0));

    PlacementPosition::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
}

/// Whether any part of the overlay lands on the image.
pub fn is_visible(
    pos: &PlacementPosition,
    image: &ImageDimensions,
    overlay: &OverlayDimensions,
) -> bool {
    let (x, y) = (i64::from(pos.x), i64::from(pos.y));
    let right = x + i64::from(overlay.width);
    let bottom = y + i64::from(overlay.height);

    x < i64::from(image.width) && y < i64::from(image.height) && right > 0 && bottom > 0
}
