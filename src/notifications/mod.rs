//! Notification history and email delivery settings for the admin console.

pub mod email_config;
pub mod query;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use email_config::{
    EmailConfigError, EmailConfigInput, EmailConfigView, EnvSmtpSettings, MailError,
    MailTransport, OutgoingMail, StoredEmailConfig, TestEmailRequest,
};
pub use query::{AlbumSummary, CustomerSummary, NotificationPage, NotificationQuery, NotificationView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    AlbumReady,
    Reminder,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Sms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

/// A stored notification row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub channel: NotificationChannel,
    pub recipient: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub status: NotificationStatus,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
