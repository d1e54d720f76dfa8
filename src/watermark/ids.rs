//! Watermark id generation.

use uuid::Uuid;

use super::WatermarkItem;
use crate::constants::WATERMARK_ID_PREFIX;

/// Source of fresh watermark ids.
///
/// The composer checks every candidate against the current list, so a
/// source only has to avoid reissuing its own ids.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random ids (`watermark-<uuid>`), used by the editor by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        format!("{}-{}", WATERMARK_ID_PREFIX, Uuid::new_v4().simple())
    }
}

/// Counter-based ids (`watermark-1`, `watermark-2`, ...).
///
/// Never rewinds, so ids freed by a removal are not handed out again in the
/// same session.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Start after the highest numeric suffix already in `list`.
    pub fn starting_after(list: &[WatermarkItem]) -> Self {
        let prefix = format!("{}-", WATERMARK_ID_PREFIX);
        let highest = list
            .iter()
            .filter_map(|item| item.id.strip_prefix(&prefix))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            prefix: WATERMARK_ID_PREFIX.to_string(),
            next: highest.saturating_add(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(WATERMARK_ID_PREFIX)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
