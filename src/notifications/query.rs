//! Filtering and paging of notification history.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{NotificationChannel, NotificationRecord, NotificationStatus, NotificationType};
use crate::config::NotificationsConfig;
use crate::error::StudioError;

/// Query-string parameters of the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQuery {
    pub limit: usize,
    pub offset: usize,
    pub status: Option<NotificationStatus>,
    pub kind: Option<NotificationType>,
    pub customer_id: Option<String>,
    pub album_id: Option<String>,
}

impl FromStr for NotificationStatus {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            other => Err(StudioError::Validation(format!(
                "Unknown notification status '{}'",
                other
            ))),
        }
    }
}

impl FromStr for NotificationType {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album_ready" => Ok(Self::AlbumReady),
            "reminder" => Ok(Self::Reminder),
            "custom" => Ok(Self::Custom),
            other => Err(StudioError::Validation(format!(
                "Unknown notification type '{}'",
                other
            ))),
        }
    }
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_count(params: &HashMap<String, String>, name: &str) -> Result<Option<usize>, StudioError> {
    param(params, name)
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                StudioError::Validation(format!("'{}' must be a non-negative integer", name))
            })
        })
        .transpose()
}

impl NotificationQuery {
    /// Parse query parameters; the limit is clamped to `1..=max_page_size`.
    pub fn from_params(
        params: &HashMap<String, String>,
        paging: &NotificationsConfig,
    ) -> Result<Self, StudioError> {
        let limit = parse_count(params, "limit")?
            .unwrap_or(paging.default_page_size)
            .clamp(1, paging.max_page_size.max(1));

        Ok(Self {
            limit,
            offset: parse_count(params, "offset")?.unwrap_or(0),
            status: param(params, "status").map(str::parse).transpose()?,
            kind: param(params, "type").map(str::parse).transpose()?,
            customer_id: param(params, "customer_id").map(str::to_string),
            album_id: param(params, "album_id").map(str::to_string),
        })
    }

    pub fn matches(&self, record: &NotificationRecord) -> bool {
        self.status.map_or(true, |s| record.status == s)
            && self.kind.map_or(true, |k| record.kind == k)
            && self
                .customer_id
                .as_deref()
                .map_or(true, |id| record.customer_id.as_deref() == Some(id))
            && self
                .album_id
                .as_deref()
                .map_or(true, |id| record.album_id.as_deref() == Some(id))
    }

    /// Filter, order newest first, page, and attach customer/album summaries.
    pub fn page(
        &self,
        records: &[NotificationRecord],
        customers: &HashMap<String, CustomerSummary>,
        albums: &HashMap<String, AlbumSummary>,
    ) -> NotificationPage {
        let mut matching: Vec<&NotificationRecord> =
            records.iter().filter(|r| self.matches(r)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len();
        let notifications = matching
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .map(|record| NotificationView {
                id: record.id.clone(),
                kind: record.kind,
                channel: record.channel,
                recipient: record.recipient.clone(),
                subject: record.subject.clone(),
                status: record.status,
                sent_at: record.sent_at,
                error_message: record.error_message.clone(),
                created_at: record.created_at,
                customer: record
                    .customer_id
                    .as_ref()
                    .and_then(|id| customers.get(id))
                    .cloned(),
                album: record.album_id.as_ref().and_then(|id| albums.get(id)).cloned(),
            })
            .collect();

        NotificationPage {
            notifications,
            total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    pub title: String,
    pub slug: String,
}

/// One row of the history response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub channel: NotificationChannel,
    pub recipient: String,
    pub subject: Option<String>,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub customer: Option<CustomerSummary>,
    pub album: Option<AlbumSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPage {
    pub notifications: Vec<NotificationView>,
    /// Number of records matching the filters
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
