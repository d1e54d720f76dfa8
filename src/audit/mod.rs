//! Audit Logging Module
//!
//! Records admin actions (album edits, watermark and style changes, email
//! settings, notification sends) as structured entries. Entries are emitted
//! as JSON on the `audit` tracing target and can be filtered and paged for
//! the admin audit-log viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuditLogConfig, AuditLogLevel};
use crate::constants::{DEFAULT_NOTIFICATION_PAGE_SIZE, MAX_NOTIFICATION_PAGE_SIZE};
use crate::logging::AUDIT_TARGET;

/// Admin action being recorded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AlbumCreate,
    AlbumUpdate,
    AlbumDelete,
    WatermarkUpdate,
    StylePresetUpdate,
    TemplateUpdate,
    EmailConfigUpdate,
    EmailTest,
    NotificationSend,
    TranslationUpdate,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlbumCreate => "album_create",
            Self::AlbumUpdate => "album_update",
            Self::AlbumDelete => "album_delete",
            Self::WatermarkUpdate => "watermark_update",
            Self::StylePresetUpdate => "style_preset_update",
            Self::TemplateUpdate => "template_update",
            Self::EmailConfigUpdate => "email_config_update",
            Self::EmailTest => "email_test",
            Self::NotificationSend => "notification_send",
            Self::TranslationUpdate => "translation_update",
        }
    }
}

/// How the action ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    #[default]
    Success,
    /// Rejected by the authorization gate
    Denied,
    Failure,
}

/// Audit log entry for a single admin action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLogEntry {
    /// Timestamp of the action (RFC3339 format)
    pub timestamp: DateTime<Utc>,

    /// Unique correlation ID (UUID)
    pub correlation_id: String,

    /// Authenticated user id, None if the gate rejected the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_email: Option<String>,

    pub action: AuditAction,

    /// Kind of record touched (album, email_config, ...)
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    pub outcome: AuditOutcome,

    /// Action-specific data, e.g. the changed fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditLogEntry {
    /// Create a new audit log entry with required fields
    pub fn new(action: AuditAction, resource_type: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            correlation_id: Uuid::new_v4().to_string(),
            actor: None,
            actor_email: None,
            action,
            resource_type: resource_type.into(),
            resource_id: None,
            outcome: AuditOutcome::Success,
            details: None,
        }
    }

    /// Set the acting user
    pub fn with_actor(mut self, id: impl Into<String>, email: Option<String>) -> Self {
        self.actor = Some(id.into());
        self.actor_email = email;
        self
    }

    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn with_outcome(mut self, outcome: AuditOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Emits audit entries according to [`AuditLogConfig`].
#[derive(Debug, Clone, Default)]
pub struct AuditLogger {
    config: AuditLogConfig,
}

impl AuditLogger {
    pub fn new(config: AuditLogConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// The JSON line that would be written, or `None` when disabled.
    pub fn render(&self, entry: &AuditLogEntry) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        let rendered = if self.config.include_details {
            entry.to_json()
        } else {
            let mut stripped = entry.clone();
            stripped.details = None;
            stripped.to_json()
        };

        match rendered {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!(error = %e, correlation_id = %entry.correlation_id, "Failed to serialize audit entry");
                None
            }
        }
    }

    /// Write an entry to the `audit` target.
    pub fn log(&self, entry: &AuditLogEntry) {
        let Some(json) = self.render(entry) else {
            return;
        };

        let action = entry.action.as_str();
        match self.config.log_level {
            AuditLogLevel::Debug => tracing::debug!(target: AUDIT_TARGET, action, entry = %json),
            AuditLogLevel::Info => tracing::info!(target: AUDIT_TARGET, action, entry = %json),
            AuditLogLevel::Warn => tracing::warn!(target: AUDIT_TARGET, action, entry = %json),
            AuditLogLevel::Error => tracing::error!(target: AUDIT_TARGET, action, entry = %json),
        }
    }
}

/// Filter and paging for the audit-log viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogQuery {
    pub actor: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self {
            actor: None,
            action: None,
            limit: DEFAULT_NOTIFICATION_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl AuditLogQuery {
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Page size, clamped to 1..=100.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_NOTIFICATION_PAGE_SIZE);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        if let Some(actor) = &self.actor {
            if entry.actor.as_deref() != Some(actor.as_str()) {
                return false;
            }
        }
        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }
        true
    }

    /// Matching entries newest first, and the total number of matches.
    pub fn page<'a>(&self, entries: &'a [AuditLogEntry]) -> (Vec<&'a AuditLogEntry>, usize) {
        let mut matching: Vec<&AuditLogEntry> =
            entries.iter().filter(|e| self.matches(e)).collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = matching.len();
        let page = matching
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect();
        (page, total)
    }
}
