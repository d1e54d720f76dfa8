//! SMTP settings: validation, password masking and the test email.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::constants::{DEFAULT_SMTP_PORT, PASSWORD_PLACEHOLDER, SMTPS_PORT};

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .map_or(false, |re| re.is_match(value))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailConfigError {
    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("A recipient email address is required")]
    MissingRecipient,

    #[error("Email service is not configured: set SMTP_HOST, SMTP_USER and SMTP_PASS")]
    NotConfigured,
}

impl EmailConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailError {
    #[error("Failed to send email: {0}")]
    Send(String),
}

/// Body of the save-settings request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailConfigInput {
    pub smtp_host: String,
    pub smtp_port: Option<u32>,
    pub smtp_secure: Option<bool>,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_email: String,
    pub from_name: Option<String>,
    pub is_active: Option<bool>,
}

/// Settings as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEmailConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_email: String,
    #[serde(default)]
    pub from_name: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Settings as returned to the admin UI; the password is never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailConfigView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_secure: bool,
    pub smtp_user: String,
    /// `******` when a password is stored, empty otherwise
    pub smtp_pass: String,
    pub from_email: String,
    pub from_name: Option<String>,
    pub is_active: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredEmailConfig {
    pub fn masked(&self) -> EmailConfigView {
        EmailConfigView {
            id: self.id.clone(),
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            smtp_secure: self.smtp_secure,
            smtp_user: self.smtp_user.clone(),
            smtp_pass: if self.smtp_pass.is_empty() {
                String::new()
            } else {
                PASSWORD_PLACEHOLDER.to_string()
            },
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            is_active: self.is_active,
            updated_at: self.updated_at,
        }
    }
}

impl EmailConfigInput {
    /// Validate against the currently stored settings, if any.
    ///
    /// An empty or placeholder password keeps the stored one.
    pub fn merge(
        self,
        existing: Option<&StoredEmailConfig>,
        now: DateTime<Utc>,
    ) -> Result<StoredEmailConfig, EmailConfigError> {
        let smtp_host = self.smtp_host.trim().to_string();
        if smtp_host.is_empty() {
            return Err(EmailConfigError::invalid("smtp_host", "SMTP host is required"));
        }

        let port = self.smtp_port.unwrap_or(u32::from(DEFAULT_SMTP_PORT));
        let smtp_port = u16::try_from(port)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| {
                EmailConfigError::invalid("smtp_port", "SMTP port must be between 1 and 65535")
            })?;

        let smtp_user = self.smtp_user.trim().to_string();
        if smtp_user.is_empty() {
            return Err(EmailConfigError::invalid("smtp_user", "SMTP user is required"));
        }

        let submitted = self.smtp_pass.trim();
        let smtp_pass = if !submitted.is_empty() && submitted != PASSWORD_PLACEHOLDER {
            self.smtp_pass.clone()
        } else {
            existing
                .map(|c| c.smtp_pass.clone())
                .filter(|p| !p.is_empty())
                .ok_or_else(|| EmailConfigError::invalid("smtp_pass", "SMTP password is required"))?
        };

        let from_email = self.from_email.trim().to_string();
        if !is_valid_email(&from_email) {
            return Err(EmailConfigError::invalid(
                "from_email",
                "A valid sender email address is required",
            ));
        }

        Ok(StoredEmailConfig {
            id: existing.and_then(|c| c.id.clone()),
            smtp_host,
            smtp_port,
            smtp_secure: self.smtp_secure.unwrap_or(true),
            smtp_user,
            smtp_pass,
            from_email,
            from_name: self
                .from_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            is_active: self.is_active.unwrap_or(true),
            updated_at: Some(now),
        })
    }
}

/// SMTP settings taken from the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvSmtpSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    #[serde(skip)]
    pub smtp_pass: String,
    pub from_email: String,
    pub has_env_config: bool,
}

impl EnvSmtpSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (`SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
    /// `SMTP_PASS`, `SMTP_FROM`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).unwrap_or_default();

        let smtp_host = var("SMTP_HOST");
        let smtp_user = var("SMTP_USER");
        let smtp_port = var("SMTP_PORT").parse().unwrap_or(DEFAULT_SMTP_PORT);
        let from_email = Some(var("SMTP_FROM"))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| smtp_user.clone());

        Self {
            has_env_config: !smtp_host.is_empty() && !smtp_user.is_empty(),
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_pass: var("SMTP_PASS"),
            from_email,
        }
    }

    /// Host, user and password all present.
    pub fn can_send(&self) -> bool {
        self.has_env_config && !self.smtp_pass.is_empty()
    }

    /// Implicit TLS on the SMTPS port, STARTTLS otherwise.
    pub fn secure(&self) -> bool {
        self.smtp_port == SMTPS_PORT
    }
}

/// A message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivers mail; implemented by the hosting application's SMTP client.
pub trait MailTransport {
    fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Body of the test-email request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestEmailRequest {
    #[serde(default)]
    pub test_email: Option<String>,
}

impl TestEmailRequest {
    /// Build the test message from environment settings.
    pub fn build(&self, env: &EnvSmtpSettings, now: DateTime<Utc>) -> Result<OutgoingMail, EmailConfigError> {
        let to = self
            .test_email
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(EmailConfigError::MissingRecipient)?;

        if !env.can_send() {
            return Err(EmailConfigError::NotConfigured);
        }

        Ok(OutgoingMail {
            host: env.smtp_host.clone(),
            port: env.smtp_port,
            secure: env.secure(),
            user: env.smtp_user.clone(),
            pass: env.smtp_pass.clone(),
            from: env.from_email.clone(),
            to: to.to_string(),
            subject: "PIS email configuration test".to_string(),
            html: format!(
                "<div style=\"font-family: sans-serif; padding: 20px;\">\
                 <h2>Email is configured</h2>\
                 <p>If you received this message, PIS can send email.</p>\
                 <p style=\"color: #666; font-size: 12px;\">Sent at {}</p></div>",
                now.to_rfc3339()
            ),
        })
    }

    /// Build and send; returns the confirmation message.
    pub fn send(
        &self,
        env: &EnvSmtpSettings,
        transport: &impl MailTransport,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        let mail = self.build(env, now)?;
        transport.send(&mail).map_err(|e| {
            tracing::error!(error = %e, host = %mail.host, port = mail.port, "Test email failed");
            ApiError::from(e)
        })?;

        tracing::info!(to = %mail.to, "Test email sent");
        Ok(format!("Test email sent to {}", mail.to))
    }
}
