//! Item-to-item relations.
//!
//! Relations are directed but always queried from both ends. The
//! `(source, target, type)` triple is unique; writing an existing triple
//! again only replaces its properties.

use rusqlite::{params, OptionalExtension};

use super::rows::{
    current_timestamp, format_timestamp, new_id, parse_column, parse_optional_json,
    to_optional_json,
};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{ItemRelation, ResourceKind},
    params::UpsertRelation,
};

const RELATION_COLUMNS: &str =
    "id, source_item_id, target_item_id, relation_type, relation_properties, created_at";
const UPSERT_RELATION_SQL: &str = "INSERT INTO item_relations (id, source_item_id, \
     target_item_id, relation_type, relation_properties, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
     ON CONFLICT (source_item_id, target_item_id, relation_type) \
     DO UPDATE SET relation_properties = excluded.relation_properties";
const SELECT_ITEM_PLAN_SQL: &str = "SELECT plan_id FROM travel_items WHERE id = ?1";
const DELETE_RELATION_SQL: &str = "DELETE FROM item_relations WHERE id = ?1";

impl super::Database {
    fn build_relation_from_row(row: &rusqlite::Row) -> rusqlite::Result<ItemRelation> {
        Ok(ItemRelation {
            id: row.get(0)?,
            source_item_id: row.get(1)?,
            target_item_id: row.get(2)?,
            relation_type: row.get(3)?,
            properties: parse_optional_json(row, 4)?,
            created_at: parse_column(row, 5)?,
        })
    }

    /// Creates a relation, or replaces the properties of the existing one
    /// with the same triple. Returns the stored row.
    ///
    /// Both endpoints must exist and belong to the same plan.
    pub fn upsert_relation(&mut self, params: &UpsertRelation) -> Result<ItemRelation> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut plans = Vec::with_capacity(2);
        for item_id in [params.source_item_id.as_str(), params.target_item_id.as_str()] {
            let plan_id: Option<String> = tx
                .query_row(SELECT_ITEM_PLAN_SQL, params![item_id], |row| row.get(0))
                .optional()
                .db_context("Failed to query item plan")?;
            let plan_id =
                plan_id.ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, item_id))?;
            plans.push(plan_id);
        }
        if plans[0] != plans[1] {
            return Err(TravelError::validation("target_item_id")
                .with_reason("related items must belong to the same plan"));
        }

        tx.execute(
            UPSERT_RELATION_SQL,
            params![
                new_id(),
                &params.source_item_id,
                &params.target_item_id,
                params.relation_type.trim(),
                to_optional_json(params.properties.as_ref())?,
                format_timestamp(current_timestamp()),
            ],
        )
        .db_context("Failed to upsert relation")?;

        let relation = tx
            .query_row(
                &format!(
                    "SELECT {RELATION_COLUMNS} FROM item_relations \
                     WHERE source_item_id = ?1 AND target_item_id = ?2 AND relation_type = ?3"
                ),
                params![
                    &params.source_item_id,
                    &params.target_item_id,
                    params.relation_type.trim()
                ],
                Self::build_relation_from_row,
            )
            .db_context("Failed to read back relation")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(relation)
    }

    /// Relations where `item_id` is either end, oldest first.
    pub fn list_relations(&self, item_id: &str) -> Result<Vec<ItemRelation>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {RELATION_COLUMNS} FROM item_relations \
                 WHERE source_item_id = ?1 OR target_item_id = ?1 \
                 ORDER BY created_at, rowid"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![item_id], Self::build_relation_from_row)
            .db_context("Failed to query relations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch relations");
        rows
    }

    pub fn get_relation(&self, id: &str) -> Result<Option<ItemRelation>> {
        self.connection
            .query_row(
                &format!("SELECT {RELATION_COLUMNS} FROM item_relations WHERE id = ?1"),
                params![id],
                Self::build_relation_from_row,
            )
            .optional()
            .db_context("Failed to query relation")
    }

    /// Returns whether a relation was removed.
    pub fn delete_relation(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_RELATION_SQL, params![id])
            .db_context("Failed to delete relation")?;
        Ok(deleted > 0)
    }
}
