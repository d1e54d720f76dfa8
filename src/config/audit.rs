//! Audit logging configuration types.

use serde::{Deserialize, Serialize};

/// Audit log level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditLogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

fn default_include_details() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogConfig {
    /// Enable/disable audit logging (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Level audit events are emitted at (default: info)
    #[serde(default)]
    pub log_level: AuditLogLevel,

    /// Whether entry details are written (default: true)
    #[serde(default = "default_include_details")]
    pub include_details: bool,
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_level: AuditLogLevel::default(),
            include_details: default_include_details(),
        }
    }
}
