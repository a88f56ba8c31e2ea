//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper prints a headline naming what happened, then the resource
//! itself. [`Labeled`] supplies the resource name and the id used in the
//! headline.

use std::fmt;

use crate::models::{BudgetItem, ItemAnnotation, ItemRelation, Plan, TravelItem};

/// A resource that can be named in an outcome headline.
pub trait Labeled: fmt::Display {
    /// Lowercase resource name, such as `plan`.
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Short human label used when the resource is gone.
    fn label(&self) -> &str;
}

impl Labeled for Plan {
    const KIND: &'static str = "plan";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for TravelItem {
    const KIND: &'static str = "item";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for ItemRelation {
    const KIND: &'static str = "relation";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.relation_type
    }
}

impl Labeled for ItemAnnotation {
    const KIND: &'static str = "annotation";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.content
    }
}

impl Labeled for BudgetItem {
    const KIND: &'static str = "budget line";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.description
    }
}

/// Outcome of a create operation.
///
/// ```rust
/// use jiff::Timestamp;
/// use wayfarer_core::{display::CreateResult, models::BudgetItem};
///
/// let line = BudgetItem {
///     id: "b1".to_string(),
///     plan_id: "p1".to_string(),
///     item_id: None,
///     category: "lodging".to_string(),
///     description: "Two nights in Riwa".to_string(),
///     estimated_amount: Some(600.0),
///     actual_amount: None,
///     currency: "CNY".to_string(),
///     payment_method: None,
///     payment_status: "pending".to_string(),
///     payment_date: None,
///     notes: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let output = CreateResult::new(line).to_string();
/// assert!(output.starts_with("Created budget line with ID: b1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Labeled> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update, optionally listing the fields that changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Labeled> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete; shows only the headline.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Labeled> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::KIND,
            self.resource.label(),
            self.resource.id()
        )
    }
}
