//! Parameter structures for Wayfarer operations
//!
//! These structures carry caller input into the [`crate::Planner`] facade.
//! They are shared by every interface (the CLI today) and depend only on
//! `serde`, so interface layers wrap them with their own framework derives and
//! convert via `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │     Planner     │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  (validated)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every create parameter has a `validate` method. The planner calls it before
//! touching the store, so a validation error never leaves partial state.
//!
//! Updates are expressed as a [`Patch`]: a JSON object of proposed field
//! values, filtered against a per-resource allow-list by
//! [`crate::db::patch`].

use jiff::{
    civil::{Date, DateTime},
    Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Result, TravelError},
    models::{ItemDetails, ItemType, Visibility},
};

/// Proposed field values for a partial update.
///
/// Keys outside the resource's allow-list are ignored.
pub type Patch = Map<String, Value>;

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Name of the plan (required)
    pub name: String,
    pub description: Option<String>,
    /// Where the trip goes; a default destination is used when empty
    pub destination: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Budget ceiling, 0 when absent
    pub budget: Option<f64>,
    /// Number of travellers, 1 when absent
    pub participants: Option<u32>,
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreatePlan {
    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if let Some(participants) = self.participants {
            if participants < 1 {
                return Err(TravelError::validation("participants").with_reason("must be at least 1"));
            }
        }
        if let Some(budget) = self.budget {
            require_non_negative("budget", budget)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TravelError::validation("end_date")
                    .with_reason("must not be before start_date"));
            }
        }
        Ok(())
    }
}

/// Parameters for adding a travel item to a plan.
///
/// `details`, when present, must belong to the family matching `item_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    pub plan_id: String,
    pub item_type: ItemType,
    pub name: String,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<i64>,
    pub address: Option<String>,
    pub start_datetime: Option<DateTime>,
    pub end_datetime: Option<DateTime>,
    pub duration_hours: Option<f64>,
    pub cost: Option<f64>,
    /// 1 to 5, defaults to 3
    pub priority: Option<u8>,
    /// Defaults to "planned"
    pub status: Option<String>,
    pub booking_status: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub images: Vec<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub order_index: Option<i64>,
    pub group_id: Option<String>,
    pub details: Option<ItemDetails>,
}

impl CreateItem {
    /// A minimal item with every optional field left empty.
    pub fn new(plan_id: impl Into<String>, item_type: ItemType, name: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            item_type,
            name: name.into(),
            description: None,
            latitude: None,
            longitude: None,
            altitude: None,
            address: None,
            start_datetime: None,
            end_datetime: None,
            duration_hours: None,
            cost: None,
            priority: None,
            status: None,
            booking_status: None,
            properties: Map::new(),
            images: Vec::new(),
            notes: None,
            tags: Vec::new(),
            order_index: None,
            group_id: None,
            details: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if let Some(priority) = self.priority {
            require_range("priority", i64::from(priority), 1, 5)?;
        }
        validate_coordinate("latitude", self.latitude, 90.0)?;
        validate_coordinate("longitude", self.longitude, 180.0)?;
        if let Some(cost) = self.cost {
            require_non_negative("cost", cost)?;
        }
        if let (Some(start), Some(end)) = (self.start_datetime, self.end_datetime) {
            if end < start {
                return Err(TravelError::validation("end_datetime")
                    .with_reason("must not be before start_datetime"));
            }
        }
        if let Some(details) = &self.details {
            validate_details(self.item_type, details)?;
        }
        Ok(())
    }
}

/// Parameters for changing a travel item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItem {
    pub item_id: String,
    #[serde(default)]
    pub patch: Patch,
    /// Replaces the item's detail record when present
    pub details: Option<ItemDetails>,
}

/// Parameters for linking two items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertRelation {
    pub source_item_id: String,
    pub target_item_id: String,
    pub relation_type: String,
    pub properties: Option<Map<String, Value>>,
}

impl UpsertRelation {
    pub fn validate(&self) -> Result<()> {
        require_text("source_item_id", &self.source_item_id)?;
        require_text("target_item_id", &self.target_item_id)?;
        require_text("relation_type", &self.relation_type)?;
        if self.source_item_id == self.target_item_id {
            return Err(TravelError::validation("target_item_id")
                .with_reason("an item cannot be related to itself"));
        }
        Ok(())
    }
}

/// Parameters for leaving a note on an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAnnotation {
    pub item_id: String,
    pub annotation_type: Option<String>,
    pub content: String,
    pub marker_lat: Option<f64>,
    pub marker_lng: Option<f64>,
    /// 1 to 5
    pub rating: Option<u8>,
}

impl CreateAnnotation {
    pub fn validate(&self) -> Result<()> {
        require_text("content", &self.content)?;
        if let Some(rating) = self.rating {
            require_range("rating", i64::from(rating), 1, 5)?;
        }
        validate_coordinate("marker_lat", self.marker_lat, 90.0)?;
        validate_coordinate("marker_lng", self.marker_lng, 180.0)?;
        Ok(())
    }
}

/// Parameters for adding a budget line to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBudgetItem {
    pub plan_id: String,
    /// Travel item this expense belongs to, if any
    pub item_id: Option<String>,
    pub category: String,
    pub description: String,
    pub estimated_amount: Option<f64>,
    pub actual_amount: Option<f64>,
    /// Defaults to "CNY"
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    /// Defaults to "pending"
    pub payment_status: Option<String>,
    pub payment_date: Option<Timestamp>,
    pub notes: Option<String>,
}

impl CreateBudgetItem {
    pub fn validate(&self) -> Result<()> {
        require_text("category", &self.category)?;
        require_text("description", &self.description)?;
        if let Some(amount) = self.estimated_amount {
            require_non_negative("estimated_amount", amount)?;
        }
        if let Some(amount) = self.actual_amount {
            require_non_negative("actual_amount", amount)?;
        }
        Ok(())
    }
}

/// Checks a detail payload against its item type and its own field ranges.
pub fn validate_details(item_type: ItemType, details: &ItemDetails) -> Result<()> {
    if !details.accepts(item_type) {
        return Err(TravelError::validation("details").with_reason(format!(
            "{} details cannot be attached to a {} item",
            details.family().as_str(),
            item_type.as_str()
        )));
    }
    match details {
        ItemDetails::Accommodation(d) => {
            if let Some(rating) = d.rating {
                if !(0.0..=5.0).contains(&rating) {
                    return Err(TravelError::validation("details.rating")
                        .with_reason("must be between 0 and 5"));
                }
            }
        }
        ItemDetails::Transport(d) => {
            if let Some(distance) = d.distance_km {
                require_non_negative("details.distance_km", distance)?;
            }
        }
        ItemDetails::Attraction(d) => {
            if let Some(level) = d.difficulty_level {
                require_range("details.difficulty_level", i64::from(level), 1, 5)?;
            }
        }
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TravelError::validation(field).with_reason("must not be empty"));
    }
    Ok(())
}

fn require_range(field: &str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(
            TravelError::validation(field).with_reason(format!("must be between {min} and {max}"))
        );
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TravelError::validation(field).with_reason("must be a non-negative number"));
    }
    Ok(())
}

fn validate_coordinate(field: &str, value: Option<f64>, limit: f64) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v.abs() > limit => Err(TravelError::validation(field)
            .with_reason(format!("must be between -{limit} and {limit}"))),
        _ => Ok(()),
    }
}
