//! Employee model.
//!
//! An [`Employee`] is the aggregate root for leave balance purposes. The engine
//! only ever receives snapshots of employees and returns updated copies; it
//! never mutates a caller's record in place.

use serde::{Deserialize, Serialize};

/// Represents an employee with an annual leave allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role or job category, used to scope booking conflicts (e.g., "Driver").
    pub role: String,
    /// Calendar color tag. Opaque to the engine.
    #[serde(default)]
    pub color: String,
    /// Annual leave allowance in working days.
    #[serde(alias = "totalDays")]
    pub total_days: u32,
    /// Working days already consumed by committed bookings.
    #[serde(default, alias = "usedDays", alias = "used")]
    pub used_days: u32,
}

impl Employee {
    /// Returns the derived available balance, `total_days - used_days`.
    ///
    /// The value is signed: a snapshot where `used_days` exceeds the allowance
    /// reports a negative balance instead of hiding the drift.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana".to_string(),
    ///     role: "Driver".to_string(),
    ///     color: "#3b82f6".to_string(),
    ///     total_days: 22,
    ///     used_days: 5,
    /// };
    /// assert_eq!(employee.available_days(), 17);
    /// ```
    pub fn available_days(&self) -> i64 {
        i64::from(self.total_days) - i64::from(self.used_days)
    }
}
