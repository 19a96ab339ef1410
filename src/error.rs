//! Error types for registry operations and their HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

/// Rejected link creation input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid URL '{0}': must be an absolute http(s) URL")]
    InvalidUrl(String),

    #[error("Invalid validity '{0}': must be a positive whole number of minutes")]
    InvalidValidity(String),

    #[error("Invalid short code '{0}': must be 3-10 alphanumeric characters")]
    InvalidShortCode(String),

    #[error("Short code '{0}' is already in use")]
    ShortCodeTaken(String),
}

impl ValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "originalUrl",
            Self::InvalidValidity(_) => "validityMinutes",
            Self::InvalidShortCode(_) | Self::ShortCodeTaken(_) => "customShortCode",
        }
    }
}

/// Failure of a registry write or read.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Unsuccessful short code resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Short code '{code}' not found")]
    NotFound { code: String },

    #[error("Short code '{code}' expired at {expires_at}")]
    Expired {
        code: String,
        expires_at: DateTime<Utc>,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// HTTP-facing error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Gone { message: String, details: Value },
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
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
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

    fn parts(&self) -> (StatusCode, &'static str, &str, &Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Gone { message, details } => (StatusCode::GONE, "expired", message, details),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    /// Converts the error into the payload used for per-item batch results.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.to_string(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        let details = json!({ "field": e.field() });
        match e {
            ValidationError::ShortCodeTaken(_) => AppError::conflict(e.to_string(), details),
            _ => AppError::bad_request(e.to_string(), details),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        tracing::error!(error = %e, "Storage failure");
        AppError::internal("Storage error", json!({}))
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::Validation(v) => v.into(),
            RegistryError::Storage(s) => s.into(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound { ref code } => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            ResolveError::Expired {
                ref code,
                expires_at,
            } => AppError::gone(
                "Short link has expired",
                json!({ "code": code, "expires_at": expires_at }),
            ),
            ResolveError::Storage(s) => s.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or_default(),
        )
    }
}
