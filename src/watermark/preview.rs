//! Overlay descriptors for the preview renderer.

use serde::Serialize;

use super::item::Align;
use super::position::{
    calculate_position, clamp_to_bounds, ImageDimensions, OverlayDimensions, PlacementPosition,
};
use super::{WatermarkItem, WatermarkKind, WatermarkPosition};
use crate::constants::{DEFAULT_WATERMARK_MARGIN, DEFAULT_WATERMARK_OPACITY};

/// What an overlay draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverlayContent {
    Text { text: String },
    Logo { url: String },
}

/// One positioned overlay, with every default already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDescriptor {
    pub id: String,
    pub content: OverlayContent,
    pub position: WatermarkPosition,
    pub opacity: f32,
    pub margin: u32,
}

impl OverlayDescriptor {
    /// Top-left pixel position on an image, kept inside its bounds.
    pub fn placement(
        &self,
        image: &ImageDimensions,
        overlay: &OverlayDimensions,
    ) -> PlacementPosition {
        let pos = calculate_position(self.position, image, overlay, self.margin);
        clamp_to_bounds(pos, image, overlay)
    }

    /// CSS declarations anchoring an absolutely positioned overlay.
    pub fn css_anchor(&self) -> String {
        let (horizontal, vertical) = self.position.alignment();
        let mut decls = Vec::with_capacity(3);

        decls.push(match horizontal {
            Align::Start => format!("left: {}px", self.margin),
            Align::Center => "left: 50%".to_string(),
            Align::End => format!("right: {}px", self.margin),
        });
        decls.push(match vertical {
            Align::Start => format!("top: {}px", self.margin),
            Align::Center => "top: 50%".to_string(),
            Align::End => format!("bottom: {}px", self.margin),
        });

        match (horizontal, vertical) {
            (Align::Center, Align::Center) => decls.push("transform: translate(-50%, -50%)".into()),
            (Align::Center, _) => decls.push("transform: translateX(-50%)".into()),
            (_, Align::Center) => decls.push("transform: translateY(-50%)".into()),
            _ => {}
        }

        decls.join("; ")
    }
}

/// What the preview renderer should draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum RenderState {
    /// Nothing to draw: the list is empty or every entry is disabled
    NoWatermark,
    /// One overlay per enabled entry; `skipped` holds enabled entries that
    /// have no text or URL yet and so draw nothing
    Overlays {
        overlays: Vec<OverlayDescriptor>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        skipped: Vec<String>,
    },
}

impl RenderState {
    pub fn overlays(&self) -> &[OverlayDescriptor] {
        match self {
            Self::NoWatermark => &[],
            Self::Overlays { overlays, .. } => overlays,
        }
    }

    /// Ids of enabled entries left out for lack of content.
    pub fn skipped(&self) -> &[String] {
        match self {
            Self::NoWatermark => &[],
            Self::Overlays { skipped, .. } => skipped,
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.overlays().is_empty()
    }
}

fn normalized_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        DEFAULT_WATERMARK_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

fn descriptor(item: &WatermarkItem, default_margin: u32) -> Option<OverlayDescriptor> {
    let value = item.content()?;

    let content = match item.kind {
        WatermarkKind::Text => OverlayContent::Text {
            text: value.to_string(),
        },
        WatermarkKind::Logo => OverlayContent::Logo {
            url: value.to_string(),
        },
    };

    Some(OverlayDescriptor {
        id: item.id.clone(),
        content,
        position: item.position,
        opacity: normalized_opacity(item.opacity),
        margin: item.margin.unwrap_or(default_margin),
    })
}

/// Overlays for the enabled entries, in list order.
pub fn preview(list: &[WatermarkItem]) -> RenderState {
    preview_with_margin(list, DEFAULT_WATERMARK_MARGIN)
}

/// Like [`preview`], with the margin used for entries that carry none.
pub fn preview_with_margin(list: &[WatermarkItem], default_margin: u32) -> RenderState {
    let mut enabled = list.iter().filter(|item| item.enabled).peekable();
    if enabled.peek().is_none() {
        return RenderState::NoWatermark;
    }

    let mut overlays = Vec::new();
    let mut skipped = Vec::new();
    for item in enabled {
        match descriptor(item, default_margin) {
            Some(overlay) => overlays.push(overlay),
            None => {
                tracing::warn!(
                    id = %item.id,
                    kind = ?item.kind,
                    "Enabled watermark has no content"
                );
                skipped.push(item.id.clone());
            }
        }
    }

    RenderState::Overlays { overlays, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_no_watermark() {
        assert_eq!(preview(&[]), RenderState::NoWatermark);
    }

    #[test]
    fn test_all_disabled_is_no_watermark() {
        let list = vec![
            WatermarkItem::text("w1", "a").with_enabled(false),
            WatermarkItem::logo("w2", "/l.png").with_enabled(false),
        ];
        let state = preview(&list);
        assert!(state.is_empty());
        assert!(state.overlays().is_empty());
    }

    #[test]
    fn test_disabled_entries_are_excluded() {
        let list = vec![
            WatermarkItem::text("w1", "a"),
            WatermarkItem::text("w2", "b").with_enabled(false),
            WatermarkItem::logo("w3", "https://cdn.example.com/l.png")
                .with_position(WatermarkPosition::TopLeft)
                .with_margin(20),
        ];
        let state = preview(&list);
        let overlays = state.overlays();
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0].id, "w1");
        assert_eq!(overlays[0].margin, 5);
        assert_eq!(
            overlays[1].content,
            OverlayContent::Logo {
                url: "https://cdn.example.com/l.png".to_string()
            }
        );
        assert_eq!(overlays[1].margin, 20);
    }

    #[test]
    fn test_enabled_entry_without_content_is_reported() {
        let list = vec![
            WatermarkItem::text("w1", "  "),
            WatermarkItem::text("w2", "© B"),
            WatermarkItem::logo("w3", ""),
        ];
        let state = preview(&list);
        assert_eq!(state.overlays().len(), 1);
        assert_eq!(state.overlays()[0].id, "w2");
        assert_eq!(state.skipped(), ["w1".to_string(), "w3".to_string()]);

        let state = preview(&list[..1]);
        assert_ne!(state, RenderState::NoWatermark);
        assert!(state.is_empty());
        assert_eq!(state.skipped(), ["w1".to_string()]);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "overlays", "overlays": [], "skipped": ["w1"]})
        );
    }

    #[test]
    fn test_opacity_is_normalized() {
        let list = vec![
            WatermarkItem::text("w1", "a").with_opacity(1.7),
            WatermarkItem::text("w2", "b").with_opacity(f32::NAN),
            WatermarkItem::text("w3", "c").with_opacity(-1.0),
        ];
        let state = preview(&list);
        let opacities: Vec<f32> = state.overlays().iter().map(|o| o.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_preview_with_margin() {
        let list = vec![WatermarkItem::text("w1", "a")];
        assert_eq!(preview_with_margin(&list, 16).overlays()[0].margin, 16);
    }

    #[test]
    fn test_css_anchor() {
        let overlay = |position| OverlayDescriptor {
            id: "w1".to_string(),
            content: OverlayContent::Text {
                text: "a".to_string(),
            },
            position,
            opacity: 0.5,
            margin: 5,
        };
        assert_eq!(
            overlay(WatermarkPosition::BottomRight).css_anchor(),
            "right: 5px; bottom: 5px"
        );
        assert_eq!(
            overlay(WatermarkPosition::Center).css_anchor(),
            "left: 50%; top: 50%; transform: translate(-50%, -50%)"
        );
        assert_eq!(
            overlay(WatermarkPosition::TopCenter).css_anchor(),
            "left: 50%; top: 5px; transform: translateX(-50%)"
        );
        assert_eq!(
            overlay(WatermarkPosition::CenterLeft).css_anchor(),
            "left: 5px; top: 50%; transform: translateY(-50%)"
        );
    }

    #[test]
    fn test_placement_is_clamped() {
        let state = preview(&[WatermarkItem::text("w1", "a").with_margin(10)]);
        let overlay = &state.overlays()[0];
        let image = ImageDimensions {
            width: 800,
            height: 600,
        };
        let pos = overlay.placement(
            &image,
            &OverlayDimensions {
                width: 100,
                height: 50,
            },
        );
        assert_eq!(pos, PlacementPosition::new(690, 540));

        let pos = overlay.placement(
            &image,
            &OverlayDimensions {
                width: 900,
                height: 50,
            },
        );
        assert_eq!(pos.x, 0);
    }

    #[test]
    fn test_render_state_serialization() {
        let json = serde_json::to_value(preview(&[])).unwrap();
        assert_eq!(json, serde_json::json!({"state": "no-watermark"}));

        let json = serde_json::to_value(preview(&[WatermarkItem::text("w1", "© A")])).unwrap();
        assert_eq!(json["state"], "overlays");
        assert_eq!(json["overlays"][0]["content"]["type"], "text");
        assert_eq!(json["overlays"][0]["position"], "bottom-right");
        assert!(json.get("skipped").is_none());
    }

    #[test]
    fn test_placement_with_extreme_margins() {
        let image = ImageDimensions {
            width: 800,
            height: 600,
        };
        let size = OverlayDimensions {
            width: 100,
            height: 50,
        };
        for margin in [1u32 << 31, u32::MAX] {
            for position in WatermarkPosition::ALL {
                let list = [WatermarkItem::text("w1", "a")
                    .with_margin(margin)
                    .with_position(position)];
                let state = preview(&list);
                let pos = state.overlays()[0].placement(&image, &size);
                assert!((0..=700).contains(&pos.x), "{:?} {}", position, margin);
                assert!((0..=550).contains(&pos.y), "{:?} {}", position, margin);
            }
        }
    }

    #[test]
    fn test_placement_with_oversized_overlay() {
        let state = preview(&[WatermarkItem::text("w1", "a").with_margin(u32::MAX)]);
        let pos = state.overlays()[0].placement(
            &ImageDimensions {
                width: 1,
                height: 1,
            },
            &OverlayDimensions {
                width: u32::MAX,
                height: u32::MAX,
            },
        );
        assert_eq!(pos, PlacementPosition::new(0, 0));
    }
}
