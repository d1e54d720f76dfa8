//! List operations over an album's watermarks.
//!
//! Every operation takes the current list by reference and returns a new
//! one; the caller owns persistence. Field-level content is not checked
//! here (see [`WatermarkItem::validate`]), only list shape: at most
//! [`MAX_WATERMARKS`] entries with unique ids, in insertion order.

use std::collections::HashSet;

use serde::Serialize;

use super::{IdSource, UuidIds, WatermarkError, WatermarkItem, WatermarkKind, WatermarkPatch};
use crate::config::EditorConfig;
use crate::constants::{
    DEFAULT_CAPACITY_MESSAGE, DEFAULT_WATERMARK_MARGIN, DEFAULT_WATERMARK_OPACITY,
    MAX_WATERMARKS, MIN_WATERMARKS_FOR_REMOVAL,
};

/// Attempts at drawing a non-colliding id from the caller's source before
/// switching to random ids.
const MAX_ID_ATTEMPTS: usize = 8;

/// Defaults used when the composer creates entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerSettings {
    /// Message carried by the capacity advisory
    pub capacity_message: String,
    /// Text given to new text watermarks
    pub default_text: Option<String>,
    /// Margin given to new entries
    pub default_margin: u32,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            capacity_message: DEFAULT_CAPACITY_MESSAGE.to_string(),
            default_text: None,
            default_margin: DEFAULT_WATERMARK_MARGIN,
        }
    }
}

impl From<&EditorConfig> for ComposerSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            capacity_message: config.capacity_message.clone(),
            default_text: config
                .photographer_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| format!("© {}", name)),
            default_margin: config.default_margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    CapacityReached,
}

/// Non-blocking notice that an operation did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

/// Result of [`add`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum AddOutcome {
    Added {
        list: Vec<WatermarkItem>,
        id: String,
    },
    /// The list was full and is returned unchanged
    AtCapacity {
        list: Vec<WatermarkItem>,
        advisory: Advisory,
    },
}

impl AddOutcome {
    pub fn list(&self) -> &[WatermarkItem] {
        match self {
            Self::Added { list, .. } | Self::AtCapacity { list, .. } => list,
        }
    }

    pub fn into_list(self) -> Vec<WatermarkItem> {
        match self {
            Self::Added { list, .. } | Self::AtCapacity { list, .. } => list,
        }
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        match self {
            Self::Added { .. } => None,
            Self::AtCapacity { advisory, .. } => Some(advisory),
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

pub fn can_add(list: &[WatermarkItem]) -> bool {
    list.len() < MAX_WATERMARKS
}

pub fn can_remove(list: &[WatermarkItem]) -> bool {
    list.len() >= MIN_WATERMARKS_FOR_REMOVAL
}

fn fresh_id(list: &[WatermarkItem], ids: &mut impl IdSource) -> String {
    let taken: HashSet<&str> = list.iter().map(|item| item.id.as_str()).collect();

    for _ in 0..MAX_ID_ATTEMPTS {
        let id = ids.next_id();
        if !taken.contains(id.as_str()) {
            return id;
        }
    }

    let mut fallback = UuidIds;
    loop {
        let id = fallback.next_id();
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}

/// Append a default text watermark, unless the list is full.
pub fn add(
    list: &[WatermarkItem],
    ids: &mut impl IdSource,
    settings: &ComposerSettings,
) -> AddOutcome {
    if !can_add(list) {
        return AddOutcome::AtCapacity {
            list: list.to_vec(),
            advisory: Advisory {
                kind: AdvisoryKind::CapacityReached,
                message: settings.capacity_message.clone(),
            },
        };
    }

    let id = fresh_id(list, ids);
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend_from_slice(list);
    next.push(WatermarkItem {
        id: id.clone(),
        kind: WatermarkKind::Text,
        text: settings.default_text.clone(),
        logo_url: None,
        opacity: DEFAULT_WATERMARK_OPACITY,
        position: Default::default(),
        margin: Some(settings.default_margin),
        enabled: true,
        extra: serde_json::Map::new(),
    });

    AddOutcome::Added { list: next, id }
}

/// Drop the entry with `id`. A list below the removal threshold, or one
/// without that id, comes back unchanged.
pub fn remove(list: &[WatermarkItem], id: &str) -> Vec<WatermarkItem> {
    if !can_remove(list) {
        return list.to_vec();
    }
    list.iter().filter(|item| item.id != id).cloned().collect()
}

/// Lay `patch` over the entry with `id`.
pub fn update(list: &[WatermarkItem], id: &str, patch: &WatermarkPatch) -> Vec<WatermarkItem> {
    list.iter()
        .map(|item| {
            if item.id == id {
                patch.apply_to(item)
            } else {
                item.clone()
            }
        })
        .collect()
}

pub fn toggle_enabled(list: &[WatermarkItem], id: &str) -> Vec<WatermarkItem> {
    list.iter()
        .map(|item| {
            let mut item = item.clone();
            if item.id == id {
                item.enabled = !item.enabled;
            }
            item
        })
        .collect()
}

/// Check list shape: entry count and id uniqueness.
pub fn validate_list(list: &[WatermarkItem]) -> Result<(), WatermarkError> {
    if list.len() > MAX_WATERMARKS {
        return Err(WatermarkError::TooMany {
            count: list.len(),
            max: MAX_WATERMARKS,
        });
    }

    let mut seen = HashSet::with_capacity(list.len());
    for item in list {
        if !seen.insert(item.id.as_str()) {
            return Err(WatermarkError::DuplicateId {
                id: item.id.clone(),
            });
        }
    }

    Ok(())
}
