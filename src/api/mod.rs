//! JSON envelopes for the admin and gallery API routes.
//!
//! Errors serialize to `{"error": {"code", "message", "details"?}}` and
//! successful responses to `{"success": true, "data": ...}`. The HTTP layer
//! itself lives in the hosting application; this module only decides status
//! codes and bodies.

use http::StatusCode;
use serde::Serialize;

use crate::auth::AuthError;
use crate::error::StudioError;
use crate::notifications::{EmailConfigError, MailError};
use crate::watermark::WatermarkError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Response body.
    pub fn body(&self) -> serde_json::Value {
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: self.code,
                message: &self.message,
                details: self.details.as_ref(),
            },
        };
        serde_json::to_value(envelope).unwrap_or_else(|_| {
            serde_json::json!({"error": {"code": self.code, "message": self.message}})
        })
    }
}

/// `{"success": true, "data": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden { .. } => ApiError::forbidden(err.to_string()),
            _ => ApiError::unauthorized(err.to_string()),
        }
    }
}

impl From<WatermarkError> for ApiError {
    fn from(err: WatermarkError) -> Self {
        ApiError::validation(err.to_string()).with_details(serde_json::json!({"field": "watermarks"}))
    }
}

impl From<EmailConfigError> for ApiError {
    fn from(err: EmailConfigError) -> Self {
        match &err {
            EmailConfigError::Invalid { field, .. } => {
                let field = *field;
                ApiError::validation(err.to_string())
                    .with_details(serde_json::json!({ "field": field }))
            }
            EmailConfigError::MissingRecipient | EmailConfigError::NotConfigured => {
                ApiError::bad_request(err.to_string())
            }
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        match err {
            StudioError::Validation(msg) => ApiError::validation(msg),
            StudioError::Auth(msg) => ApiError::unauthorized(msg),
            StudioError::Config(_) | StudioError::Internal(_) => {
                ApiError::internal("Internal server error")
            }
        }
    }
}

/// Convert an error into its response, logging it on the way.
pub fn handle_error<E>(err: E) -> ApiError
where
    E: Into<ApiError> + std::fmt::Display,
{
    let description = err.to_string();
    let api_error: ApiError = err.into();

    if api_error.status.is_server_error() {
        tracing::error!(status = api_error.status.as_u16(), code = api_error.code, error = %description, "API error");
    } else {
        tracing::warn!(status = api_error.status.as_u16(), code = api_error.code, error = %description, "API request rejected");
    }

    api_error
}
