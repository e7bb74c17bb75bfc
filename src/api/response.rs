//! Response types for the Vacation Engine API.
//!
//! This module defines the success bodies that are not plain domain types,
//! the error body, and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BalanceSummary, Reconciliation};

/// Response body for the `/working-days` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDaysResponse {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// Monday to Friday days in the range.
    pub work_days: u32,
}

/// Response body for the `/employees/summary` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummaryResponse {
    /// Allowance broken down by booking status.
    pub summary: BalanceSummary,
    /// Stored counter compared with the bookings.
    pub reconciliation: Reconciliation,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an error response for a date that is not strict `YYYY-MM-DD`.
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::new("INVALID_DATE", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

/// Maps an engine error to its HTTP status.
///
/// Problems with the request itself are 400, rule denials are 422, a
/// same-role overlap is 409, and anything pointing at broken state is 500.
pub fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::UnknownEmployee { .. }
        | EngineError::UnknownBooking { .. }
        | EngineError::InvalidDate { .. }
        | EngineError::HolidayCalendarNotFound { .. } => StatusCode::BAD_REQUEST,
        EngineError::InvalidRange { .. }
        | EngineError::HolidayConflict { .. }
        | EngineError::InsufficientBalance { .. }
        | EngineError::PastCancellationForbidden { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::RoleConflict { .. } => StatusCode::CONFLICT,
        EngineError::LedgerInconsistency { .. }
        | EngineError::InvalidTransition { .. }
        | EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(&error);
        let code = error.code();
        let api_error = match &error {
            EngineError::RoleConflict {
                employee_id,
                booking_id,
                ..
            } => ApiError::with_details(
                code,
                error.to_string(),
                format!(
                    "Conflicts with booking '{}' of employee '{}'",
                    booking_id, employee_id
                ),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            EngineError::HolidayCalendarNotFound { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Supply explicit holidays or a jurisdiction with a configured calendar",
            ),
            _ => ApiError::new(code, error.to_string()),
        };
        ApiErrorResponse {
            status,
            error: api_error,
        }
    }
}
