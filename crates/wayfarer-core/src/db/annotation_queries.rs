//! Annotation CRUD operations.

use rusqlite::{params, OptionalExtension};

use super::rows::{current_timestamp, format_timestamp, get_optional_unsigned, new_id, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{ItemAnnotation, ResourceKind},
    params::CreateAnnotation,
};

const ANNOTATION_COLUMNS: &str = "id, item_id, annotation_type, content, marker_lat, marker_lng, \
     rating, created_by, created_at, updated_at";
const INSERT_ANNOTATION_SQL: &str = "INSERT INTO item_annotations (id, item_id, annotation_type, \
     content, marker_lat, marker_lng, rating, created_by, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const CHECK_ITEM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM travel_items WHERE id = ?1)";
const DELETE_ANNOTATION_SQL: &str = "DELETE FROM item_annotations WHERE id = ?1";

impl super::Database {
    fn build_annotation_from_row(row: &rusqlite::Row) -> rusqlite::Result<ItemAnnotation> {
        Ok(ItemAnnotation {
            id: row.get(0)?,
            item_id: row.get(1)?,
            annotation_type: row.get(2)?,
            content: row.get(3)?,
            marker_lat: row.get(4)?,
            marker_lng: row.get(5)?,
            rating: get_optional_unsigned(row, 6)?,
            created_by: row.get(7)?,
            created_at: parse_column(row, 8)?,
            updated_at: parse_column(row, 9)?,
        })
    }

    /// Leaves a note on an item, attributed to `creator`.
    pub fn create_annotation(
        &self,
        creator: &str,
        params: &CreateAnnotation,
    ) -> Result<ItemAnnotation> {
        let item_exists: bool = self
            .connection
            .query_row(CHECK_ITEM_EXISTS_SQL, params![&params.item_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check item existence")?;
        if !item_exists {
            return Err(TravelError::not_found(
                ResourceKind::TravelItem,
                &params.item_id,
            ));
        }

        let now = current_timestamp();
        let annotation = ItemAnnotation {
            id: new_id(),
            item_id: params.item_id.clone(),
            annotation_type: params.annotation_type.clone(),
            content: params.content.trim().to_string(),
            marker_lat: params.marker_lat,
            marker_lng: params.marker_lng,
            rating: params.rating,
            created_by: creator.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.connection
            .execute(
                INSERT_ANNOTATION_SQL,
                params![
                    &annotation.id,
                    &annotation.item_id,
                    &annotation.annotation_type,
                    &annotation.content,
                    annotation.marker_lat,
                    annotation.marker_lng,
                    annotation.rating,
                    &annotation.created_by,
                    format_timestamp(annotation.created_at),
                    format_timestamp(annotation.updated_at),
                ],
            )
            .db_context("Failed to insert annotation")?;

        Ok(annotation)
    }

    pub fn get_annotation(&self, id: &str) -> Result<Option<ItemAnnotation>> {
        self.connection
            .query_row(
                &format!("SELECT {ANNOTATION_COLUMNS} FROM item_annotations WHERE id = ?1"),
                params![id],
                Self::build_annotation_from_row,
            )
            .optional()
            .db_context("Failed to query annotation")
    }

    /// Annotations on an item, newest first.
    pub fn list_annotations(&self, item_id: &str) -> Result<Vec<ItemAnnotation>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ANNOTATION_COLUMNS} FROM item_annotations WHERE item_id = ?1 \
                 ORDER BY created_at DESC, rowid DESC"
            ))
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![item_id], Self::build_annotation_from_row)
            .db_context("Failed to query annotations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch annotations");
        rows
    }

    /// Returns whether an annotation was removed.
    pub fn delete_annotation(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_ANNOTATION_SQL, params![id])
            .db_context("Failed to delete annotation")?;
        Ok(deleted > 0)
    }
}
