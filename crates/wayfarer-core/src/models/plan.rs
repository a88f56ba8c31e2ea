//! Plan model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Visibility};

/// Destination recorded when a plan is created without one.
pub const DEFAULT_DESTINATION: &str = "Daocheng Yading";

/// Suffix appended to the name of a duplicated plan.
pub const COPY_SUFFIX: &str = " (copy)";

/// A trip owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Opaque unique identifier (UUID v4)
    pub id: String,

    /// Owning user
    pub user_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub destination: String,

    pub start_date: Option<Date>,
    pub end_date: Option<Date>,

    /// Budget ceiling for the whole trip
    #[serde(default)]
    pub budget: f64,

    /// Number of travellers
    pub participants: u32,

    #[serde(default)]
    pub status: PlanStatus,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Whether `user_id` may read this plan.
    pub fn is_viewable_by(&self, user_id: &str) -> bool {
        self.user_id == user_id || self.visibility == Visibility::Public
    }
}
