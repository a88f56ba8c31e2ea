//! Plan CRUD operations and queries.

use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{
    current_timestamp, format_timestamp, get_unsigned, new_id, parse_column, parse_json,
    parse_optional_column, to_json,
};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{
        DuplicateOutcome, DuplicateStatus, Plan, PlanFilter, PlanStatus, ResourceKind, Visibility,
        COPY_SUFFIX, DEFAULT_DESTINATION,
    },
    params::CreatePlan,
};

const PLAN_COLUMNS: &str = "id, user_id, name, description, destination, start_date, end_date, \
     budget, participants, status, visibility, tags, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id, user_id, name, description, destination, \
     start_date, end_date, budget, participants, status, visibility, tags, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Plan from a database row
    pub(crate) fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            destination: row.get(4)?,
            start_date: parse_optional_column(row, 5)?,
            end_date: parse_optional_column(row, 6)?,
            budget: row.get(7)?,
            participants: get_unsigned(row, 8)?,
            status: parse_column::<PlanStatus>(row, 9)?,
            visibility: parse_column::<Visibility>(row, 10)?,
            tags: parse_json(row, 11)?,
            created_at: parse_column(row, 12)?,
            updated_at: parse_column(row, 13)?,
        })
    }

    /// Creates a plan owned by `user_id`.
    ///
    /// New plans start as private drafts for one traveller; an empty
    /// destination falls back to [`DEFAULT_DESTINATION`].
    pub fn create_plan(&mut self, user_id: &str, params: &CreatePlan) -> Result<Plan> {
        let now = current_timestamp();
        let destination = params
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESTINATION);

        let plan = Plan {
            id: new_id(),
            user_id: user_id.to_string(),
            name: params.name.trim().to_string(),
            description: params.description.clone().unwrap_or_default(),
            destination: destination.to_string(),
            start_date: params.start_date,
            end_date: params.end_date,
            budget: params.budget.unwrap_or(0.0),
            participants: params.participants.unwrap_or(1),
            status: PlanStatus::Draft,
            visibility: params.visibility.unwrap_or_default(),
            tags: params.tags.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        insert_plan(&tx, &plan)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(plan)
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        self.connection
            .query_row(
                &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
                params![id],
                Self::build_plan_from_row,
            )
            .optional()
            .db_context("Failed to query plan")
    }

    /// Lists the plans owned by `user_id`, newest first.
    pub fn list_plans(&self, user_id: &str, filter: &PlanFilter) -> Result<Vec<Plan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = ?1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(status) = filter.status {
            query.push_str(" AND status = ?2");
            params_vec.push(Box::new(status.as_str()));
        }
        query.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let rows = stmt
            .query_map(&params_refs[..], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans");
        rows
    }

    /// Lists another user's public plans, newest first.
    pub fn list_public_plans(&self, owner_id: &str) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {PLAN_COLUMNS} FROM plans WHERE user_id = ?1 AND visibility = ?2 \
                 ORDER BY created_at DESC, rowid DESC"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(
                params![owner_id, Visibility::Public.as_str()],
                Self::build_plan_from_row,
            )
            .db_context("Failed to query public plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch public plans");
        rows
    }

    /// Deletes a plan and, through foreign keys, everything it owns.
    ///
    /// Returns whether a plan was removed.
    pub fn delete_plan(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id])
            .db_context("Failed to delete plan")?;
        Ok(deleted > 0)
    }

    /// Copies a plan and its items into a new draft owned by `user_id`.
    ///
    /// The plan copy is committed on its own before any item is copied. If
    /// copying the items fails afterwards, the copy is kept and the outcome
    /// is [`DuplicateStatus::Partial`] with no items.
    pub fn duplicate_plan(&mut self, source_id: &str, user_id: &str) -> Result<DuplicateOutcome> {
        let source = self
            .get_plan(source_id)?
            .ok_or_else(|| TravelError::not_found(ResourceKind::Plan, source_id))?;

        let now = current_timestamp();
        let copy = Plan {
            id: new_id(),
            user_id: user_id.to_string(),
            name: format!("{}{COPY_SUFFIX}", source.name),
            status: PlanStatus::Draft,
            visibility: Visibility::Private,
            created_at: now,
            updated_at: now,
            ..source
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        insert_plan(&tx, &copy)?;
        tx.commit().db_context("Failed to commit plan copy")?;

        let (copied_items, status) = match self.copy_items(source_id, &copy.id, user_id) {
            Ok(count) => (count, DuplicateStatus::Complete),
            Err(e) => (
                0,
                DuplicateStatus::Partial {
                    reason: e.to_string(),
                },
            ),
        };

        Ok(DuplicateOutcome {
            plan: copy,
            copied_items,
            status,
        })
    }
}

fn insert_plan(conn: &Connection, plan: &Plan) -> Result<()> {
    conn.execute(
        INSERT_PLAN_SQL,
        params![
            &plan.id,
            &plan.user_id,
            &plan.name,
            &plan.description,
            &plan.destination,
            plan.start_date.map(|d| d.to_string()),
            plan.end_date.map(|d| d.to_string()),
            plan.budget,
            plan.participants,
            plan.status.as_str(),
            plan.visibility.as_str(),
            to_json(&plan.tags)?,
            format_timestamp(plan.created_at),
            format_timestamp(plan.updated_at),
        ],
    )
    .db_context("Failed to insert plan")?;
    Ok(())
}
