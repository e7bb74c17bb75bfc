//! HTTP API module for the Vacation Engine.
//!
//! This module exposes the engine's operations as JSON endpoints. Every
//! request carries its own employee and booking snapshots; the server only
//! holds read-only configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BookingCommandRequest, CancelBookingRequest, EmployeeSummaryRequest, WorkingDaysRequest,
};
pub use response::{ApiError, EmployeeSummaryResponse, WorkingDaysResponse, status_for};
pub use state::AppState;
