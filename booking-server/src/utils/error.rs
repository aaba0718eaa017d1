//! Unified Error Handling
//!
//! Application-wide error type and response envelope. Every failure leaving
//! an async operation is converted here into a user-visible response; none
//! propagate uncaught.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use validator::ValidationErrors;

use crate::db::repository::RepoError;

/// Unified API response structure
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Per-field validation errors, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl AppError {
    /// Unified message, prevents email enumeration during login
    pub fn invalid_credentials() -> Self {
        Self::Invalid("Invalid email or password".to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::BusinessRule(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut errors = None;

        let (status, code, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "E3001", "Please login first".to_string())
            }
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003", "Token expired".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E3002", "Invalid token".to_string()),

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            // Conflict (409) - e.g. availability check failed
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.clone()),

            // Validation (400), reported per field
            AppError::Validation(errs) => {
                errors = serde_json::to_value(errs).ok();
                (
                    StatusCode::BAD_REQUEST,
                    "E0002",
                    "Validation failed".to_string(),
                )
            }

            // Business rule (422)
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.clone())
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error".to_string())
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }

            // Invalid request (400)
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
            errors,
        });

        (status, body).into_response()
    }
}
