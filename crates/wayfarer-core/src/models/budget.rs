//! Budget line entries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Currency used when none is given.
pub const DEFAULT_CURRENCY: &str = "CNY";

/// Payment status used when none is given.
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// A planned or actual expense of a plan.
///
/// The optional item link is cleared, not the budget line deleted, when the
/// linked travel item goes away.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    pub id: String,
    pub plan_id: String,
    pub item_id: Option<String>,
    pub category: String,
    pub description: String,
    pub estimated_amount: Option<f64>,
    pub actual_amount: Option<f64>,
    pub currency: String,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub payment_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
