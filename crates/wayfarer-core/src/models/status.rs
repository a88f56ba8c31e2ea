//! Closed enumerations stored as text columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is still being put together
    #[default]
    Draft,
    /// Trip is booked or under way
    Active,
    /// Trip is over
    Completed,
    /// Plan is hidden from normal views
    Archived,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            "archived" => Ok(PlanStatus::Archived),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    pub const ALL: [PlanStatus; 4] = [
        PlanStatus::Draft,
        PlanStatus::Active,
        PlanStatus::Completed,
        PlanStatus::Archived,
    ];

    /// Convert to database string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Archived => "archived",
        }
    }
}

/// Who may read a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only the owner
    #[default]
    Private,
    /// Anyone
    Public,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            _ => Err(format!("Invalid visibility: {s}")),
        }
    }
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Private, Visibility::Public];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

/// The closed set of travel item kinds.
///
/// The kind is fixed at creation and decides which detail record, if any, an
/// item may carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Accommodation,
    Transport,
    Attraction,
    PhotoSpot,
    RestArea,
    Checkpoint,
    Other,
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accommodation" => Ok(ItemType::Accommodation),
            "transport" => Ok(ItemType::Transport),
            "attraction" => Ok(ItemType::Attraction),
            "photo_spot" | "photospot" => Ok(ItemType::PhotoSpot),
            "rest_area" | "restarea" => Ok(ItemType::RestArea),
            "checkpoint" => Ok(ItemType::Checkpoint),
            "other" => Ok(ItemType::Other),
            _ => Err(format!("Invalid item type: {s}")),
        }
    }
}

impl ItemType {
    pub const ALL: [ItemType; 7] = [
        ItemType::Accommodation,
        ItemType::Transport,
        ItemType::Attraction,
        ItemType::PhotoSpot,
        ItemType::RestArea,
        ItemType::Checkpoint,
        ItemType::Other,
    ];

    /// Convert to database string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemType::Accommodation => "accommodation",
            ItemType::Transport => "transport",
            ItemType::Attraction => "attraction",
            ItemType::PhotoSpot => "photo_spot",
            ItemType::RestArea => "rest_area",
            ItemType::Checkpoint => "checkpoint",
            ItemType::Other => "other",
        }
    }
}

/// Kinds of resources guarded by ownership checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Plan,
    TravelItem,
    Relation,
    Annotation,
    BudgetItem,
}

impl ResourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Plan => "plan",
            ResourceKind::TravelItem => "travel item",
            ResourceKind::Relation => "relation",
            ResourceKind::Annotation => "annotation",
            ResourceKind::BudgetItem => "budget item",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Capitalized so messages read "Plan with ID .. not found"
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}
