//! Application error type and its HTTP representation.
//!
//! Every failure that can reach a handler is expressed as an [`AppError`].
//! The variant decides the HTTP status and the machine-readable `code`
//! field of the JSON error envelope:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "Custom alias already in use", "details": {} } }
//! ```
//!
//! Internal errors are logged with full detail but rendered with a generic
//! message and empty details, so store or cache internals never leak to callers.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error description used in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Error taxonomy of the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad URL, bad alias, bad date. Always user-correctable.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The short code has never existed.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The short code existed but its expiration has passed.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// The requested custom alias is already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Store failures, misconfiguration and other server-side faults.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code used in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its public representation.
    ///
    /// Internal errors are stripped of message detail.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Internal { .. } => ErrorInfo {
                code: self.code(),
                message: "Internal server error".to_string(),
                details: json!({}),
            },
            Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::Expired { message, details }
            | Self::Conflict { message, details } => ErrorInfo {
                code: self.code(),
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, details } = &self {
            tracing::error!(details = %details, "{}", message);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or_default(),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
