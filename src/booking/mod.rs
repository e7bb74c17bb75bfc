//! Booking lifecycle for the Vacation Engine.
//!
//! This module composes the calculation functions into the validate-then-commit
//! decision for new bookings and the compensating credit for cancellations.

mod orchestrator;

pub use orchestrator::{BookingOrchestrator, BookingPolicy};
