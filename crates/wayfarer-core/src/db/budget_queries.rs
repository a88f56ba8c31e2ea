//! Budget line CRUD operations.

use rusqlite::{params, OptionalExtension};

use super::rows::{
    current_timestamp, format_timestamp, new_id, parse_column, parse_optional_column,
};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{BudgetItem, ResourceKind, DEFAULT_CURRENCY, DEFAULT_PAYMENT_STATUS},
    params::CreateBudgetItem,
};

const BUDGET_COLUMNS: &str = "id, plan_id, item_id, category, description, estimated_amount, \
     actual_amount, currency, payment_method, payment_status, payment_date, notes, created_at, \
     updated_at";
const INSERT_BUDGET_SQL: &str = "INSERT INTO budget_items (id, plan_id, item_id, category, \
     description, estimated_amount, actual_amount, currency, payment_method, payment_status, \
     payment_date, notes, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const SELECT_ITEM_PLAN_SQL: &str = "SELECT plan_id FROM travel_items WHERE id = ?1";
const DELETE_BUDGET_SQL: &str = "DELETE FROM budget_items WHERE id = ?1";

impl super::Database {
    fn build_budget_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<BudgetItem> {
        Ok(BudgetItem {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            item_id: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            estimated_amount: row.get(5)?,
            actual_amount: row.get(6)?,
            currency: row.get(7)?,
            payment_method: row.get(8)?,
            payment_status: row.get(9)?,
            payment_date: parse_optional_column(row, 10)?,
            notes: row.get(11)?,
            created_at: parse_column(row, 12)?,
            updated_at: parse_column(row, 13)?,
        })
    }

    /// Adds a budget line to a plan.
    ///
    /// A linked item must belong to the same plan.
    pub fn create_budget_item(&self, params: &CreateBudgetItem) -> Result<BudgetItem> {
        let plan_exists: bool = self
            .connection
            .query_row(CHECK_PLAN_EXISTS_SQL, params![&params.plan_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan existence")?;
        if !plan_exists {
            return Err(TravelError::not_found(ResourceKind::Plan, &params.plan_id));
        }

        if let Some(item_id) = &params.item_id {
            let item_plan: Option<String> = self
                .connection
                .query_row(SELECT_ITEM_PLAN_SQL, params![item_id], |row| row.get(0))
                .optional()
                .db_context("Failed to query item plan")?;
            match item_plan {
                None => return Err(TravelError::not_found(ResourceKind::TravelItem, item_id)),
                Some(plan_id) if plan_id != params.plan_id => {
                    return Err(TravelError::validation("item_id")
                        .with_reason("linked item belongs to another plan"))
                }
                Some(_) => {}
            }
        }

        let now = current_timestamp();
        let budget_item = BudgetItem {
            id: new_id(),
            plan_id: params.plan_id.clone(),
            item_id: params.item_id.clone(),
            category: params.category.trim().to_string(),
            description: params.description.trim().to_string(),
            estimated_amount: params.estimated_amount,
            actual_amount: params.actual_amount,
            currency: params
                .currency
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            payment_method: params.payment_method.clone(),
            payment_status: params
                .payment_status
                .clone()
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            payment_date: params.payment_date,
            notes: params.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        self.connection
            .execute(
                INSERT_BUDGET_SQL,
                params![
                    &budget_item.id,
                    &budget_item.plan_id,
                    &budget_item.item_id,
                    &budget_item.category,
                    &budget_item.description,
                    budget_item.estimated_amount,
                    budget_item.actual_amount,
                    &budget_item.currency,
                    &budget_item.payment_method,
                    &budget_item.payment_status,
                    budget_item.payment_date.map(format_timestamp),
                    &budget_item.notes,
                    format_timestamp(budget_item.created_at),
                    format_timestamp(budget_item.updated_at),
                ],
            )
            .db_context("Failed to insert budget item")?;

        Ok(budget_item)
    }

    pub fn get_budget_item(&self, id: &str) -> Result<Option<BudgetItem>> {
        self.connection
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budget_items WHERE id = ?1"),
                params![id],
                Self::build_budget_item_from_row,
            )
            .optional()
            .db_context("Failed to query budget item")
    }

    /// A plan's budget lines in the order they were added.
    pub fn list_budget_items(&self, plan_id: &str) -> Result<Vec<BudgetItem>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {BUDGET_COLUMNS} FROM budget_items WHERE plan_id = ?1 \
                 ORDER BY created_at, rowid"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![plan_id], Self::build_budget_item_from_row)
            .db_context("Failed to query budget items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch budget items");
        rows
    }

    /// Returns whether a budget line was removed.
    pub fn delete_budget_item(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_BUDGET_SQL, params![id])
            .db_context("Failed to delete budget item")?;
        Ok(deleted > 0)
    }
}
