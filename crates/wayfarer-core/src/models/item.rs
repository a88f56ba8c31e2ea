//! Travel item model definition.

use jiff::{civil::DateTime, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ItemDetails, ItemType};

/// Priority assigned when the caller does not supply one.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Status assigned when the caller does not supply one.
pub const DEFAULT_ITEM_STATUS: &str = "planned";

/// One scheduled or unscheduled element of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelItem {
    pub id: String,
    pub plan_id: String,
    pub item_type: ItemType,
    pub name: String,
    pub description: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level
    pub altitude: Option<i64>,
    pub address: Option<String>,

    /// Wall-clock start in the item's own local time
    pub start_datetime: Option<DateTime>,
    pub end_datetime: Option<DateTime>,
    pub duration_hours: Option<f64>,
    pub cost: Option<f64>,

    /// 1 (lowest) to 5 (highest)
    pub priority: u8,
    pub status: String,
    pub booking_status: Option<String>,

    /// Open key-value payload, stored as an opaque JSON blob
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    pub order_index: Option<i64>,
    pub group_id: Option<String>,

    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Type-specific record, only populated on single-item fetches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ItemDetails>,
}

impl TravelItem {
    /// Cost counted by aggregations; a missing cost contributes nothing.
    pub fn effective_cost(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}
