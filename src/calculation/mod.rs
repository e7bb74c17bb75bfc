//! Calculation logic for the Vacation Engine.
//!
//! This module contains the pure building blocks the booking orchestrator
//! composes: working-day counting and other calendar utilities, the balance
//! check, role-scoped overlap detection, and the employee ledger.

mod balance;
mod conflict;
mod ledger;
mod working_days;

pub use balance::has_sufficient_balance;
pub use conflict::{RoleMatching, find_overlap};
pub use ledger::{apply_delta, debit, reconcile, summarize};
pub use working_days::{
    count_working_days, days_in_range, is_holiday, is_past, is_working_day, parse_iso_date,
};
