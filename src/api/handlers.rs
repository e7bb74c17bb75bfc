//! HTTP request handlers for the Vacation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::booking::BookingOrchestrator;
use crate::calculation::{count_working_days, reconcile, summarize};
use crate::error::EngineError;
use crate::models::HolidaySet;

use super::request::{
    BookingCommandRequest, CancelBookingRequest, EmployeeSummaryRequest, WorkingDaysRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, EmployeeSummaryResponse, WorkingDaysResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/working-days", post(working_days_handler))
        .route("/bookings/preview", post(preview_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings/cancel", post(cancel_booking_handler))
        .route("/employees/summary", post(employee_summary_handler))
        .with_state(state)
}

/// Serializes `body` as a JSON response with the given status.
fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON payload, turning extractor rejections into 400 responses.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message lives in the body text, not the Display impl
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else if body_text.contains("Invalid date") {
                ApiError::invalid_date(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs an engine error and converts it into an error response.
fn engine_error_response(correlation_id: Uuid, error: EngineError, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = error.code(),
        error = %error,
        "{}",
        context
    );
    ApiErrorResponse::from(error).into_response()
}

/// Handler for POST /working-days endpoint.
///
/// Counts Monday to Friday days in an inclusive range, ignoring holidays.
async fn working_days_handler(
    payload: Result<Json<WorkingDaysRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working-days request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    match count_working_days(request.start_date, request.end_date) {
        Ok(work_days) => json_response(
            StatusCode::OK,
            WorkingDaysResponse {
                start_date: request.start_date,
                end_date: request.end_date,
                work_days,
            },
        ),
        Err(error) => engine_error_response(correlation_id, error, "Working-days count failed"),
    }
}

/// Handler for POST /bookings/preview endpoint.
///
/// Returns the verdict for a tentative booking. Rule denials are part of the
/// verdict and still answer 200; only unusable requests are errors.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingCommandRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking preview request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let holidays = match state.holidays_for(
        request.holidays.clone(),
        request.jurisdiction.as_deref(),
        request.start_date,
        request.end_date,
    ) {
        Ok(holidays) => holidays,
        Err(error) => return engine_error_response(correlation_id, error, "Holiday lookup failed"),
    };
    let reference_now = state.reference_now(request.reference_now);

    let start_time = Instant::now();
    let orchestrator =
        BookingOrchestrator::new(&holidays, &request.employees, &request.bookings, reference_now)
            .with_policy(state.config().settings().policy());
    let verdict = orchestrator.preview(&request.booking_request());

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        accepted = verdict.is_accepted(),
        work_days = verdict.work_days,
        duration_us = start_time.elapsed().as_micros(),
        "Booking preview completed"
    );
    json_response(StatusCode::OK, verdict)
}

/// Handler for POST /bookings endpoint.
///
/// Validates the booking and, on success, returns the new booking together
/// with the updated employee.
async fn create_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<BookingCommandRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create booking request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let holidays = match state.holidays_for(
        request.holidays.clone(),
        request.jurisdiction.as_deref(),
        request.start_date,
        request.end_date,
    ) {
        Ok(holidays) => holidays,
        Err(error) => return engine_error_response(correlation_id, error, "Holiday lookup failed"),
    };
    let reference_now = state.reference_now(request.reference_now);

    let start_time = Instant::now();
    let orchestrator =
        BookingOrchestrator::new(&holidays, &request.employees, &request.bookings, reference_now)
            .with_policy(state.config().settings().policy());
    let booking_id = Uuid::new_v4().to_string();

    match orchestrator.commit(&request.booking_request(), booking_id) {
        Ok(committed) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %committed.employee.id,
                booking_id = %committed.booking.id,
                work_days = committed.booking.work_days,
                duration_us = start_time.elapsed().as_micros(),
                "Booking created"
            );
            json_response(StatusCode::CREATED, committed)
        }
        Err(error) => engine_error_response(correlation_id, error, "Booking refused"),
    }
}

/// Handler for POST /bookings/cancel endpoint.
///
/// Returns the compensating credit for removing a booking from the snapshot.
async fn cancel_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<CancelBookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cancel booking request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let Some(booking) = request.bookings.iter().find(|b| b.id == request.booking_id) else {
        let error = EngineError::UnknownBooking {
            booking_id: request.booking_id.clone(),
        };
        return engine_error_response(correlation_id, error, "Cancellation refused");
    };

    let holidays = HolidaySet::new();
    let reference_now = state.reference_now(request.reference_now);
    let orchestrator =
        BookingOrchestrator::new(&holidays, &request.employees, &request.bookings, reference_now)
            .with_policy(state.config().settings().policy());

    match orchestrator.cancel(booking) {
        Ok(cancellation) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %cancellation.booking_id,
                employee_id = %cancellation.employee.id,
                was_completed = cancellation.was_completed,
                "Booking cancellation computed"
            );
            json_response(StatusCode::OK, cancellation)
        }
        Err(error) => engine_error_response(correlation_id, error, "Cancellation refused"),
    }
}

/// Handler for POST /employees/summary endpoint.
///
/// Breaks an employee's allowance down by booking status and reconciles the
/// stored counter against the bookings.
async fn employee_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee summary request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };

    let Some(employee) = request
        .employees
        .iter()
        .find(|e| e.id == request.employee_id)
    else {
        let error = EngineError::UnknownEmployee {
            employee_id: request.employee_id.clone(),
        };
        return engine_error_response(correlation_id, error, "Employee summary failed");
    };

    let reference_now = state.reference_now(request.reference_now);
    let summary = summarize(employee, &request.bookings, reference_now);
    let reconciliation = reconcile(employee, &request.bookings);

    if !reconciliation.is_consistent() {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %employee.id,
            drift = reconciliation.drift,
            "Recorded used days differ from bookings"
        );
    }

    json_response(
        StatusCode::OK,
        EmployeeSummaryResponse {
            summary,
            reconciliation,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{CommittedBooking, Verdict};
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config").expect("Failed to load config");
        AppState::new(config)
    }

    fn employees() -> Value {
        json!([
            { "id": "emp_a", "name": "Ana", "role": "Driver", "total_days": 22, "used_days": 0 },
            { "id": "emp_b", "name": "Bruno", "role": "Driver", "total_days": 22, "used_days": 0 }
        ])
    }

    async fn post(uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_api_001_working_days_returns_200() {
        let body = json!({ "start_date": "2026-01-05", "end_date": "2026-01-09" }).to_string();
        let (status, body) = post("/working-days", body).await;

        assert_eq!(status, StatusCode::OK);
        let result: WorkingDaysResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.work_days, 5);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let (status, body) = post("/bookings", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_field_returns_400() {
        let body = json!({ "start_date": "2026-01-05", "end_date": "2026-01-09", "employees": [] })
            .to_string();
        let (status, body) = post("/bookings/preview", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employee_id"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_api_009_unpadded_date_returns_invalid_date() {
        let body = json!({ "start_date": "2026-1-5", "end_date": "2026-01-09" }).to_string();
        let (status, body) = post("/working-days", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_DATE");
        assert!(error.message.contains("2026-1-5"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_api_004_preview_denial_is_200() {
        let body = json!({
            "employee_id": "emp_a",
            "start_date": "2026-01-01",
            "end_date": "2026-01-02",
            "employees": employees(),
            "reference_now": "2025-12-01T09:00:00"
        })
        .to_string();
        let (status, body) = post("/bookings/preview", body).await;

        assert_eq!(status, StatusCode::OK);
        let verdict: Verdict = serde_json::from_slice(&body).unwrap();
        assert!(!verdict.is_accepted());
        assert_eq!(verdict.denial.unwrap().code, "HOLIDAY_CONFLICT");
    }

    #[tokio::test]
    async fn test_api_005_create_booking_returns_201() {
        let body = json!({
            "employee_id": "emp_a",
            "start_date": "2026-01-05",
            "end_date": "2026-01-09",
            "employees": employees(),
            "reference_now": "2025-12-01T09:00:00"
        })
        .to_string();
        let (status, body) = post("/bookings", body).await;

        assert_eq!(status, StatusCode::CREATED);
        let committed: CommittedBooking = serde_json::from_slice(&body).unwrap();
        assert_eq!(committed.booking.work_days, 5);
        assert_eq!(committed.employee.used_days, 5);
        assert!(Uuid::parse_str(&committed.booking.id).is_ok());
    }

    #[tokio::test]
    async fn test_api_006_role_conflict_returns_409() {
        let body = json!({
            "employee_id": "emp_b",
            "start_date": "2026-01-07",
            "end_date": "2026-01-13",
            "employees": employees(),
            "bookings": [
                { "id": "bk_1", "employee_id": "emp_a", "start_date": "2026-01-05",
                  "end_date": "2026-01-09", "work_days": 5 }
            ],
            "reference_now": "2025-12-01T09:00:00"
        })
        .to_string();
        let (status, body) = post("/bookings", body).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "ROLE_CONFLICT");
    }

    #[tokio::test]
    async fn test_api_007_cancel_unknown_booking_returns_400() {
        let body = json!({
            "booking_id": "bk_missing",
            "employees": employees(),
            "bookings": []
        })
        .to_string();
        let (status, body) = post("/bookings/cancel", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "UNKNOWN_BOOKING");
    }

    #[tokio::test]
    async fn test_api_008_summary_unknown_employee_returns_400() {
        let body = json!({ "employee_id": "ghost", "employees": employees() }).to_string();
        let (status, body) = post("/employees/summary", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "UNKNOWN_EMPLOYEE");
    }
}
