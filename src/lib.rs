//! Vacation Scheduling & Balance Validation Engine
//!
//! This crate counts chargeable working days, validates leave bookings against
//! holiday calendars, remaining balance and role-scoped overlap rules, and
//! produces the balance deltas that keep each employee's ledger consistent as
//! bookings are created and cancelled.

#![warn(missing_docs)]

pub mod api;
pub mod booking;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
