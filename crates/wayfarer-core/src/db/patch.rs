//! Allow-listed partial updates.
//!
//! Each patchable resource has a static table of [`FieldSpec`]s naming the
//! logical field, the column it maps to and the value shape it accepts. A
//! caller's patch is filtered against that table: unknown keys are dropped,
//! known keys are converted to SQL values, and a single `UPDATE` is issued.
//! Table and column names only ever come from the static tables.
//!
//! ```text
//! {"name": "..", "priority": 9, "plan_id": ".."}
//!        │             │               │
//!        ▼             ▼               ▼
//!    TEXT name    Validation err    dropped
//! ```

use jiff::{
    civil::{Date, DateTime},
    Timestamp,
};
use rusqlite::{types::Value as SqlValue, Connection, OptionalExtension};
use serde_json::Value;

use super::rows::{current_timestamp, format_timestamp};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{PlanStatus, ResourceKind, Visibility},
    params::Patch,
};

/// Value shape a patchable field accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    /// Text that is not blank after trimming
    NonEmptyText,
    Real { min: f64, max: f64 },
    Integer { min: i64, max: i64 },
    /// One of a closed set of lowercase strings
    Choice(&'static [&'static str]),
    /// `YYYY-MM-DD`
    Date,
    /// Civil datetime without offset
    DateTime,
    /// RFC 3339 instant
    Timestamp,
    JsonObject,
    StringList,
}

/// One allow-listed field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key accepted in a patch
    pub field: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    /// Whether JSON `null` clears the column
    pub nullable: bool,
}

const fn spec(field: &'static str, kind: FieldKind, nullable: bool) -> FieldSpec {
    FieldSpec {
        field,
        column: field,
        kind,
        nullable,
    }
}

const AMOUNT: FieldKind = FieldKind::Real {
    min: 0.0,
    max: f64::MAX,
};
const ANY_INTEGER: FieldKind = FieldKind::Integer {
    min: i64::MIN,
    max: i64::MAX,
};
const LATITUDE: FieldKind = FieldKind::Real {
    min: -90.0,
    max: 90.0,
};
const LONGITUDE: FieldKind = FieldKind::Real {
    min: -180.0,
    max: 180.0,
};
const ONE_TO_FIVE: FieldKind = FieldKind::Integer { min: 1, max: 5 };

const PLAN_STATUSES: [&str; 4] = [
    PlanStatus::Draft.as_str(),
    PlanStatus::Active.as_str(),
    PlanStatus::Completed.as_str(),
    PlanStatus::Archived.as_str(),
];
const VISIBILITIES: [&str; 2] = [Visibility::Private.as_str(), Visibility::Public.as_str()];

const PLAN_FIELDS: &[FieldSpec] = &[
    spec("name", FieldKind::NonEmptyText, false),
    spec("description", FieldKind::Text, false),
    spec("destination", FieldKind::Text, false),
    spec("start_date", FieldKind::Date, true),
    spec("end_date", FieldKind::Date, true),
    spec("budget", AMOUNT, false),
    spec(
        "participants",
        FieldKind::Integer {
            min: 1,
            max: u32::MAX as i64,
        },
        false,
    ),
    spec("status", FieldKind::Choice(&PLAN_STATUSES), false),
    spec("visibility", FieldKind::Choice(&VISIBILITIES), false),
    spec("tags", FieldKind::StringList, false),
];

const TRAVEL_ITEM_FIELDS: &[FieldSpec] = &[
    spec("name", FieldKind::NonEmptyText, false),
    spec("description", FieldKind::Text, true),
    spec("latitude", LATITUDE, true),
    spec("longitude", LONGITUDE, true),
    spec("altitude", ANY_INTEGER, true),
    spec("address", FieldKind::Text, true),
    spec("start_datetime", FieldKind::DateTime, true),
    spec("end_datetime", FieldKind::DateTime, true),
    spec("duration_hours", AMOUNT, true),
    spec("cost", AMOUNT, true),
    spec("priority", ONE_TO_FIVE, false),
    spec("status", FieldKind::NonEmptyText, false),
    spec("booking_status", FieldKind::Text, true),
    spec("properties", FieldKind::JsonObject, false),
    spec("images", FieldKind::StringList, false),
    spec("notes", FieldKind::Text, true),
    spec("tags", FieldKind::StringList, false),
    spec("order_index", ANY_INTEGER, true),
    spec("group_id", FieldKind::Text, true),
];

const ANNOTATION_FIELDS: &[FieldSpec] = &[
    spec("content", FieldKind::NonEmptyText, false),
    spec("annotation_type", FieldKind::Text, true),
    spec("rating", ONE_TO_FIVE, true),
    spec("marker_lat", LATITUDE, true),
    spec("marker_lng", LONGITUDE, true),
];

const BUDGET_ITEM_FIELDS: &[FieldSpec] = &[
    spec("category", FieldKind::NonEmptyText, false),
    spec("description", FieldKind::NonEmptyText, false),
    spec("estimated_amount", AMOUNT, true),
    spec("actual_amount", AMOUNT, true),
    spec("currency", FieldKind::NonEmptyText, false),
    spec("payment_method", FieldKind::Text, true),
    spec("payment_status", FieldKind::NonEmptyText, false),
    spec("payment_date", FieldKind::Timestamp, true),
    spec("notes", FieldKind::Text, true),
];

/// A resource that accepts partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    Plan,
    TravelItem,
    Annotation,
    BudgetItem,
}

impl PatchTarget {
    pub fn table(&self) -> &'static str {
        match self {
            PatchTarget::Plan => "plans",
            PatchTarget::TravelItem => "travel_items",
            PatchTarget::Annotation => "item_annotations",
            PatchTarget::BudgetItem => "budget_items",
        }
    }

    /// The allow-list for this resource.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            PatchTarget::Plan => PLAN_FIELDS,
            PatchTarget::TravelItem => TRAVEL_ITEM_FIELDS,
            PatchTarget::Annotation => ANNOTATION_FIELDS,
            PatchTarget::BudgetItem => BUDGET_ITEM_FIELDS,
        }
    }

    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            PatchTarget::Plan => ResourceKind::Plan,
            PatchTarget::TravelItem => ResourceKind::TravelItem,
            PatchTarget::Annotation => ResourceKind::Annotation,
            PatchTarget::BudgetItem => ResourceKind::BudgetItem,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.field == name)
    }

    /// The start and end fields whose order an update must keep.
    pub fn span(&self) -> Option<(&'static str, &'static str)> {
        match self {
            PatchTarget::Plan => Some(("start_date", "end_date")),
            PatchTarget::TravelItem => Some(("start_datetime", "end_datetime")),
            PatchTarget::Annotation | PatchTarget::BudgetItem => None,
        }
    }
}

impl FieldSpec {
    /// Converts a proposed JSON value into the column's SQL value.
    pub fn to_sql(&self, value: &Value) -> Result<SqlValue> {
        if value.is_null() {
            return if self.nullable {
                Ok(SqlValue::Null)
            } else {
                Err(self.invalid("cannot be null"))
            };
        }

        match self.kind {
            FieldKind::Text => value
                .as_str()
                .map(|s| SqlValue::Text(s.to_string()))
                .ok_or_else(|| self.invalid("expected a string")),
            FieldKind::NonEmptyText => match value.as_str() {
                Some(s) if !s.trim().is_empty() => Ok(SqlValue::Text(s.to_string())),
                Some(_) => Err(self.invalid("must not be empty")),
                None => Err(self.invalid("expected a string")),
            },
            FieldKind::Real { min, max } => match value.as_f64() {
                Some(n) if n.is_finite() && n >= min && n <= max => Ok(SqlValue::Real(n)),
                Some(_) => Err(self.invalid(format!("must be between {min} and {max}"))),
                None => Err(self.invalid("expected a number")),
            },
            FieldKind::Integer { min, max } => match value.as_i64() {
                Some(n) if n >= min && n <= max => Ok(SqlValue::Integer(n)),
                Some(_) => Err(self.invalid(format!("must be between {min} and {max}"))),
                None => Err(self.invalid("expected an integer")),
            },
            FieldKind::Choice(options) => {
                let choice = value
                    .as_str()
                    .map(str::to_lowercase)
                    .ok_or_else(|| self.invalid("expected a string"))?;
                if options.contains(&choice.as_str()) {
                    Ok(SqlValue::Text(choice))
                } else {
                    Err(self.invalid(format!("must be one of: {}", options.join(", "))))
                }
            }
            FieldKind::Date => self
                .parse_text::<Date>(value)
                .map(|d| SqlValue::Text(d.to_string())),
            FieldKind::DateTime => self
                .parse_text::<DateTime>(value)
                .map(|dt| SqlValue::Text(dt.to_string())),
            FieldKind::Timestamp => self
                .parse_text::<Timestamp>(value)
                .map(|ts| SqlValue::Text(format_timestamp(ts))),
            FieldKind::JsonObject => {
                if value.is_object() {
                    Ok(SqlValue::Text(serde_json::to_string(value)?))
                } else {
                    Err(self.invalid("expected a JSON object"))
                }
            }
            FieldKind::StringList => match value.as_array() {
                Some(values) if values.iter().all(Value::is_string) => {
                    Ok(SqlValue::Text(serde_json::to_string(value)?))
                }
                _ => Err(self.invalid("expected a list of strings")),
            },
        }
    }

    fn parse_text<T>(&self, value: &Value) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = value
            .as_str()
            .ok_or_else(|| self.invalid("expected a string"))?;
        raw.parse::<T>()
            .map_err(|e| self.invalid(format!("cannot parse '{raw}': {e}")))
    }

    fn invalid(&self, reason: impl Into<String>) -> TravelError {
        TravelError::validation(self.field).with_reason(reason)
    }
}

/// Applies the allow-listed subset of `patch` to one row of `target`.
///
/// Every statement also refreshes `updated_at`, so an empty or fully
/// filtered patch still touches the row. Returns the number of rows changed,
/// 0 when `id` does not exist.
pub fn apply_patch(
    conn: &Connection,
    target: PatchTarget,
    id: &str,
    patch: &Patch,
) -> Result<usize> {
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    for spec in target.fields() {
        if let Some(value) = patch.get(spec.field) {
            values.push(spec.to_sql(value)?);
            assignments.push(format!("{} = ?{}", spec.column, values.len()));
        }
    }

    values.push(SqlValue::Text(format_timestamp(current_timestamp())));
    assignments.push(format!("updated_at = ?{}", values.len()));
    values.push(SqlValue::Text(id.to_string()));

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        target.table(),
        assignments.join(", "),
        values.len()
    );

    let changed = conn
        .execute(&sql, rusqlite::params_from_iter(values))
        .db_context("Failed to apply update")?;
    if changed > 0 {
        check_span(conn, target, id)?;
    }
    Ok(changed)
}

/// Fails when the row's end now lies before its start.
///
/// Runs after the `UPDATE` so that a patch moving only one bound is checked
/// against the stored other bound. The caller's transaction undoes the write.
fn check_span(conn: &Connection, target: PatchTarget, id: &str) -> Result<()> {
    let Some((start_field, end_field)) = target.span() else {
        return Ok(());
    };
    let (Some(start_spec), Some(end_spec)) = (target.field(start_field), target.field(end_field))
    else {
        return Ok(());
    };

    let sql = format!(
        "SELECT {}, {} FROM {} WHERE id = ?1",
        start_spec.column,
        end_spec.column,
        target.table()
    );
    let bounds: Option<(Option<String>, Option<String>)> = conn
        .query_row(&sql, [id], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()
        .db_context("Failed to read updated dates")?;

    let Some((Some(start), Some(end))) = bounds else {
        return Ok(());
    };
    let inverted = match start_spec.kind {
        FieldKind::Date => is_before::<Date>(&end, &start),
        FieldKind::DateTime => is_before::<DateTime>(&end, &start),
        _ => end < start,
    };
    if inverted {
        return Err(TravelError::validation(end_field)
            .with_reason(format!("must not be before {start_field}")));
    }
    Ok(())
}

fn is_before<T: std::str::FromStr + Ord>(left: &str, right: &str) -> bool {
    match (left.parse::<T>(), right.parse::<T>()) {
        (Ok(left), Ok(right)) => left < right,
        _ => false,
    }
}

impl super::Database {
    /// Applies a partial update in its own transaction.
    pub fn apply_patch(&self, target: PatchTarget, id: &str, patch: &Patch) -> Result<usize> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;
        let changed = apply_patch(&tx, target, id, patch)?;
        tx.commit().db_context("Failed to commit update")?;
        Ok(changed)
    }
}
