//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`.
//!
//! Every error response is JSON with a `detail` key. Validation errors carry a
//! list of field-level entries:
//!
//! ```json
//! {"detail": [{"loc": ["body", "email"], "msg": "Field required", "type": "missing"}]}
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use loopcart_core::{FieldError, ValidationErrors};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::services::MailError;

/// Where a validation error was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Query,
}

impl Location {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
        }
    }
}

/// One entry of a validation error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationDetail {
    fn from_field(location: Location, error: FieldError) -> Self {
        Self {
            loc: vec![location.as_str().to_string(), error.field.to_string()],
            msg: error.message,
            kind: error.kind.as_str().to_string(),
        }
    }

    fn from_rejection(location: Location, kind: &str, msg: String) -> Self {
        Self {
            loc: vec![location.as_str().to_string()],
            msg,
            kind: kind.to_string(),
        }
    }
}

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input failed validation.
    #[error("Validation failed: {}", format_details(.0))]
    Validation(Vec<ValidationDetail>),

    /// Mail credentials were not configured at startup.
    #[error("Email environment variables not configured")]
    EmailNotConfigured,

    /// Building or delivering an email failed.
    #[error("Failed to send email: {0}")]
    Mail(#[from] MailError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
}

fn format_details(details: &[ValidationDetail]) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}", d.loc.join("."), d.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Build a validation error from field errors found in `location`.
    #[must_use]
    pub fn validation(location: Location, errors: ValidationErrors) -> Self {
        Self::Validation(
            errors
                .into_iter()
                .map(|e| ValidationDetail::from_field(location, e))
                .collect(),
        )
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailNotConfigured | Self::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::JsonDataError(_) => "type_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };
        Self::Validation(vec![ValidationDetail::from_rejection(
            Location::Body,
            kind,
            rejection.body_text(),
        )])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(vec![ValidationDetail::from_rejection(
            Location::Query,
            "query_error",
            rejection.body_text(),
        )])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = match self {
            Self::Validation(details) => json!({ "detail": details }),
            other => json!({ "detail": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Product not found");

        assert_eq!(
            AppError::EmailNotConfigured.to_string(),
            "Email environment variables not configured"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Validation(Vec::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::EmailNotConfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_email_not_configured_body() {
        let body = body_json(AppError::EmailNotConfigured.into_response()).await;
        assert_eq!(
            body,
            json!({"detail": "Email environment variables not configured"})
        );
    }

    #[tokio::test]
    async fn test_mail_error_body_includes_cause() {
        let err = AppError::from(MailError::InvalidAddress("bogus".to_string()));
        let body = body_json(err.into_response()).await;
        assert_eq!(
            body,
            json!({"detail": "Failed to send email: Invalid email address: bogus"})
        );
    }

    #[tokio::test]
    async fn test_validation_body_is_field_level() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::missing("fullName"));

        let response = AppError::validation(Location::Body, errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"detail": [{"loc": ["body", "fullName"], "msg": "Field required", "type": "missing"}]})
        );
    }
}
