//! Configuration types for the Vacation Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::booking::BookingPolicy;
use crate::calculation::RoleMatching;

/// Engine-wide settings loaded from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Jurisdiction whose holiday calendars apply when a request names none.
    pub default_jurisdiction: String,
    /// How role labels are compared for conflict scoping.
    #[serde(default)]
    pub role_matching: RoleMatching,
    /// Whether bookings that have already ended may still be cancelled.
    #[serde(default = "default_allow_past_cancellation")]
    pub allow_past_cancellation: bool,
}

fn default_allow_past_cancellation() -> bool {
    true
}

impl EngineSettings {
    /// Returns the booking policy described by these settings.
    pub fn policy(&self) -> BookingPolicy {
        BookingPolicy {
            role_matching: self.role_matching,
            allow_past_cancellation: self.allow_past_cancellation,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_jurisdiction: "PT".to_string(),
            role_matching: RoleMatching::default(),
            allow_past_cancellation: default_allow_past_cancellation(),
        }
    }
}
