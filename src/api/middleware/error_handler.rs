//! Error handler for converting AppError to HTTP responses.
//!
//! This module implements the IntoResponse trait for AppError,
//! providing consistent error response formatting across the API.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404
    /// - Duplicate → 409
    /// - Validation / ValidationErrors / BadRequest → 400
    /// - NoActiveProviders → 422
    /// - Database / Configuration / Internal → 500
    /// - ConnectionPool / Amqp → 503
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound { entity, field, value } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", &format!("{} not found for {}={}", entity, field, value)),
            ),
            AppError::Duplicate { entity, field, value } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "DUPLICATE",
                    &format!("{}.{} = '{}' already exists", entity, field, value),
                ),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", &format!("{}: {}", field, reason))
                    .with_details(reason),
            ),
            AppError::ValidationErrors { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", "Request failed validation").with_details(
                    &errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            ),
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new("BAD_REQUEST", message))
            }
            AppError::NoActiveProviders { notification_type } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "NO_ACTIVE_PROVIDERS",
                    &format!("No active providers configured for notification type: {}", notification_type),
                ),
            ),
            AppError::Database { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("DATABASE_ERROR", "Database operation failed"),
            ),
            AppError::Configuration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("CONFIGURATION_ERROR", "Server configuration error"),
            ),
            AppError::ConnectionPool { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
            ),
            AppError::Amqp { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Message broker unavailable"),
            ),
            AppError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
            ),
        };

        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE) {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
///
/// Useful for testing and validation purposes.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } | AppError::BadRequest { .. } => {
            StatusCode::BAD_REQUEST
        }
        AppError::NoActiveProviders { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } | AppError::Amqp { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}
