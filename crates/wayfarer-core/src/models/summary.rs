//! Derived, read-only views computed from a plan's items and budget.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use super::{ItemType, Plan, TravelItem};

/// Items scheduled on one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyItinerary {
    pub date: Date,
    pub items: Vec<TravelItem>,
    /// Sum of defined item costs
    pub total_cost: f64,
    /// Earliest start among the day's items
    pub start_time: Option<DateTime>,
    /// Latest defined end among the day's items
    pub end_time: Option<DateTime>,
}

/// Count and cost of one item type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TypeTotals {
    pub item_type: ItemType,
    pub count: u32,
    pub cost: f64,
}

/// Plan-wide statistics across travel items and budget lines.
///
/// `total_cost` is what the items themselves cost; `estimated_cost` is what
/// the budget lines expect. The two are deliberately not reconciled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlanSummary {
    pub plan_id: String,
    pub total_items: u32,
    pub total_cost: f64,
    pub estimated_cost: f64,
    pub accommodation_days: u32,
    pub transport_count: u32,
    /// Attractions and photo spots together
    pub attraction_count: u32,
    pub start_date: Option<DateTime>,
    pub end_date: Option<DateTime>,
    pub duration_days: i64,
    /// Per-type breakdown, one entry per type present, in [`ItemType`] order
    pub by_type: Vec<TypeTotals>,
}

/// Budget ceiling against estimated and actual spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    pub plan_id: String,
    pub total_budget: f64,
    pub total_estimated: f64,
    pub total_actual: f64,
    /// Ceiling minus actual spend; negative when over budget
    pub remaining: f64,
    pub line_count: u32,
}

/// Whether every step of a plan duplication succeeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DuplicateStatus {
    Complete,
    /// The plan copy exists but its items could not be copied
    Partial { reason: String },
}

/// Result of duplicating a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateOutcome {
    pub plan: Plan,
    pub copied_items: u32,
    #[serde(flatten)]
    pub status: DuplicateStatus,
}

impl DuplicateOutcome {
    pub fn is_partial(&self) -> bool {
        matches!(self.status, DuplicateStatus::Partial { .. })
    }
}
