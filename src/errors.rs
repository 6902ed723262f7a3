//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{FieldError, ScheduleError};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Scheduling-specific errors
    #[error(transparent)]
    InvalidSchedule(#[from] ScheduleError),

    #[error("Invalid exception")]
    InvalidException(Vec<FieldError>),

    #[error("Requested slot is no longer available")]
    SlotTaken { conflicting_id: Uuid },

    #[error("Business is closed on the requested date")]
    BusinessClosed {
        reason: Option<String>,
        next_open: Option<String>,
    },

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    /// Field-level validation failures, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
    /// Whether re-querying availability and retrying may succeed.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    retryable: bool,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::InvalidSchedule(_) => "INVALID_SCHEDULE",
            AppError::InvalidException(_) => "INVALID_EXCEPTION",
            AppError::SlotTaken { .. } => "SLOT_TAKEN",
            AppError::BusinessClosed { .. } => "BUSINESS_CLOSED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidSchedule(_) | AppError::InvalidException(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::SlotTaken { .. } | AppError::BusinessClosed { .. } => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidSchedule(e) => format!("Invalid weekly schedule: {}", e),
            AppError::InvalidException(_) => "Exception failed validation".to_string(),
            AppError::SlotTaken { .. } => {
                "Requested slot is no longer available; refresh availability and pick another slot"
                    .to_string()
            }
            AppError::BusinessClosed { reason, next_open } => {
                let mut msg = match reason {
                    Some(reason) => format!("Business is closed: {}", reason),
                    None => "Business is closed on the requested date".to_string(),
                };
                if let Some(next_open) = next_open {
                    msg.push_str(&format!("; next open {}", next_open));
                }
                msg
            }

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    fn details(&self) -> Option<Vec<FieldError>> {
        match self {
            AppError::InvalidException(errors) => Some(errors.clone()),
            _ => None,
        }
    }

    /// Conflicts at commit time are expected under concurrent load and are
    /// always recoverable by re-reading availability.
    fn retryable(&self) -> bool {
        matches!(self, AppError::SlotTaken { .. })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                details: self.details(),
                retryable: self.retryable(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
