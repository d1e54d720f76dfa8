//! Editing session over one album's watermark list.
//!
//! The session owns the list while the admin edits it. Each call runs the
//! matching composer operation and swaps in the returned list; the caller
//! reads [`WatermarkEditor::watermarks`] back when the album is saved.

use super::composer::{self, validate_list, AddOutcome, Advisory, ComposerSettings};
use super::preview::{preview_with_margin, RenderState};
use super::{IdSource, UuidIds, WatermarkError, WatermarkItem, WatermarkPatch};

/// Receives advisories raised during a session.
pub trait AdvisorySink {
    fn notify(&mut self, advisory: &Advisory);
}

/// Logs advisories at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAdvisorySink;

impl AdvisorySink for TracingAdvisorySink {
    fn notify(&mut self, advisory: &Advisory) {
        tracing::info!(kind = ?advisory.kind, message = %advisory.message, "Watermark advisory");
    }
}

impl AdvisorySink for Vec<Advisory> {
    fn notify(&mut self, advisory: &Advisory) {
        self.push(advisory.clone());
    }
}

pub struct WatermarkEditor<I = UuidIds, S = TracingAdvisorySink> {
    list: Vec<WatermarkItem>,
    ids: I,
    sink: S,
    settings: ComposerSettings,
}

impl WatermarkEditor {
    pub fn new(list: Vec<WatermarkItem>, settings: ComposerSettings) -> Self {
        Self::with_parts(list, UuidIds, TracingAdvisorySink, settings)
    }
}

impl<I: IdSource, S: AdvisorySink> WatermarkEditor<I, S> {
    pub fn with_parts(list: Vec<WatermarkItem>, ids: I, sink: S, settings: ComposerSettings) -> Self {
        Self {
            list,
            ids,
            sink,
            settings,
        }
    }

    pub fn watermarks(&self) -> &[WatermarkItem] {
        &self.list
    }

    pub fn into_watermarks(self) -> Vec<WatermarkItem> {
        self.list
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether the add control should be enabled.
    pub fn can_add(&self) -> bool {
        composer::can_add(&self.list)
    }

    /// Whether remove controls should be shown.
    pub fn can_remove(&self) -> bool {
        composer::can_remove(&self.list)
    }

    /// Append a default watermark and return its id.
    ///
    /// At capacity the list is left alone and the advisory goes to the sink,
    /// even if the add control was supposed to be disabled.
    pub fn add(&mut self) -> Option<String> {
        match composer::add(&self.list, &mut self.ids, &self.settings) {
            AddOutcome::Added { list, id } => {
                tracing::debug!(id = %id, count = list.len(), "Watermark added");
                self.list = list;
                Some(id)
            }
            AddOutcome::AtCapacity { advisory, .. } => {
                self.sink.notify(&advisory);
                None
            }
        }
    }

    /// Remove an entry. Returns whether the list changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let next = composer::remove(&self.list, id);
        let changed = next.len() != self.list.len();
        self.list = next;
        changed
    }

    /// Apply a patch after checking the fields it sets.
    ///
    /// Returns `Ok(false)` when no entry has `id`.
    pub fn update(&mut self, id: &str, patch: &WatermarkPatch) -> Result<bool, WatermarkError> {
        if !self.list.iter().any(|item| item.id == id) {
            return Ok(false);
        }
        patch.validate(id)?;

        self.list = composer::update(&self.list, id, patch);
        Ok(true)
    }

    pub fn toggle_enabled(&mut self, id: &str) -> bool {
        if !self.list.iter().any(|item| item.id == id) {
            return false;
        }
        self.list = composer::toggle_enabled(&self.list, id);
        true
    }

    /// Check the whole list before it is saved: shape, then every entry.
    pub fn validate(&self) -> Result<(), WatermarkError> {
        validate_list(&self.list)?;
        self.list.iter().try_for_each(WatermarkItem::validate)
    }

    pub fn preview(&self) -> RenderState {
        preview_with_margin(&self.list, self.settings.default_margin)
    }
}
