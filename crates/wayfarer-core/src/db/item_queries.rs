//! Travel item CRUD operations and queries.

use rusqlite::{params, Connection, OptionalExtension};

use super::{
    detail_queries::{insert_details, item_type_of, load_details, replace_details},
    patch::{apply_patch, PatchTarget},
    rows::{
        current_timestamp, format_timestamp, get_unsigned, new_id, parse_column, parse_json,
        parse_optional_column, to_json,
    },
};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{
        ItemDetails, ItemPage, ItemQuery, ResourceKind, TravelItem,
        DEFAULT_ITEM_STATUS, DEFAULT_PRIORITY,
    },
    params::{validate_details, CreateItem, Patch},
};

const ITEM_COLUMNS: &str = "id, plan_id, item_type, name, description, latitude, longitude, \
     altitude, address, start_datetime, end_datetime, duration_hours, cost, priority, status, \
     booking_status, properties, images, notes, tags, order_index, group_id, created_by, \
     created_at, updated_at";
const INSERT_ITEM_SQL: &str = "INSERT INTO travel_items (id, plan_id, item_type, name, \
     description, latitude, longitude, altitude, address, start_datetime, end_datetime, \
     duration_hours, cost, priority, status, booking_status, properties, images, notes, tags, \
     order_index, group_id, created_by, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, \
     ?19, ?20, ?21, ?22, ?23, ?24, ?25)";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const DELETE_ITEM_SQL: &str = "DELETE FROM travel_items WHERE id = ?1";

// Scheduled items first by start, then explicit order, then creation
const ITEM_ORDER: &str = "ORDER BY start_datetime IS NULL, start_datetime, \
     order_index IS NULL, order_index, created_at, rowid";

impl super::Database {
    /// Helper function to construct a TravelItem from a database row
    pub(crate) fn build_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<TravelItem> {
        Ok(TravelItem {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            item_type: parse_column(row, 2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            latitude: row.get(5)?,
            longitude: row.get(6)?,
            altitude: row.get(7)?,
            address: row.get(8)?,
            start_datetime: parse_optional_column(row, 9)?,
            end_datetime: parse_optional_column(row, 10)?,
            duration_hours: row.get(11)?,
            cost: row.get(12)?,
            priority: get_unsigned(row, 13)?,
            status: row.get(14)?,
            booking_status: row.get(15)?,
            properties: parse_json(row, 16)?,
            images: parse_json(row, 17)?,
            notes: row.get(18)?,
            tags: parse_json(row, 19)?,
            order_index: row.get(20)?,
            group_id: row.get(21)?,
            created_by: row.get(22)?,
            created_at: parse_column(row, 23)?,
            updated_at: parse_column(row, 24)?,
            details: None,
        })
    }

    /// Adds an item to a plan together with its detail record.
    ///
    /// The item row and the detail row are written in one transaction; a
    /// detail payload that does not match the item type rejects the whole
    /// create.
    pub fn create_item(&mut self, creator: &str, params: &CreateItem) -> Result<TravelItem> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![&params.plan_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan existence")?;
        if !plan_exists {
            return Err(TravelError::not_found(ResourceKind::Plan, &params.plan_id));
        }

        let now = current_timestamp();
        let mut item = TravelItem {
            id: new_id(),
            plan_id: params.plan_id.clone(),
            item_type: params.item_type,
            name: params.name.trim().to_string(),
            description: params.description.clone(),
            latitude: params.latitude,
            longitude: params.longitude,
            altitude: params.altitude,
            address: params.address.clone(),
            start_datetime: params.start_datetime,
            end_datetime: params.end_datetime,
            duration_hours: params.duration_hours,
            cost: params.cost,
            priority: params.priority.unwrap_or(DEFAULT_PRIORITY),
            status: params
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_ITEM_STATUS.to_string()),
            booking_status: params.booking_status.clone(),
            properties: params.properties.clone(),
            images: params.images.clone(),
            notes: params.notes.clone(),
            tags: params.tags.clone(),
            order_index: params.order_index,
            group_id: params.group_id.clone(),
            created_by: Some(creator.to_string()),
            created_at: now,
            updated_at: now,
            details: None,
        };

        insert_item(&tx, &item)?;
        if let Some(details) = &params.details {
            insert_details(&tx, &item.id, item.item_type, details)?;
        }
        tx.commit().db_context("Failed to commit transaction")?;

        item.details = params.details.clone();
        Ok(item)
    }

    /// Retrieves an item by its ID, with its detail record.
    pub fn get_item(&self, id: &str) -> Result<Option<TravelItem>> {
        let item = self
            .connection
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM travel_items WHERE id = ?1"),
                params![id],
                Self::build_item_from_row,
            )
            .optional()
            .db_context("Failed to query item")?;

        match item {
            Some(mut item) => {
                item.details = load_details(&self.connection, &item.id, item.item_type)?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Lists one page of a plan's items.
    ///
    /// Both the type and the date filter apply to the page and to the total.
    /// The date filter matches the calendar date of the start datetime.
    pub fn list_items(&self, plan_id: &str, query: &ItemQuery) -> Result<ItemPage> {
        let mut conditions = vec!["plan_id = ?"];
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(plan_id.to_string())];

        if let Some(item_type) = query.item_type {
            conditions.push("item_type = ?");
            params_vec.push(Box::new(item_type.as_str()));
        }
        if let Some(date) = query.date {
            conditions.push("substr(start_datetime, 1, 10) = ?");
            params_vec.push(Box::new(date.to_string()));
        }
        let where_clause = conditions.join(" AND ");
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let total: i64 = self
            .connection
            .query_row(
                &format!("SELECT COUNT(*) FROM travel_items WHERE {where_clause}"),
                &params_refs[..],
                |row| row.get(0),
            )
            .db_context("Failed to count items")?;

        let page = query.effective_page();
        let page_size = query.effective_page_size();
        let offset = query.offset();

        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM travel_items WHERE {where_clause} {ITEM_ORDER} \
                 LIMIT {page_size} OFFSET {offset}"
            ))
            .db_context("Failed to prepare query")?;

        let items = stmt
            .query_map(&params_refs[..], Self::build_item_from_row)
            .db_context("Failed to query items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch items")?;

        let total = u64::try_from(total).unwrap_or(0);
        let has_more = offset + (items.len() as u64) < total;

        Ok(ItemPage {
            items,
            total,
            page,
            page_size,
            has_more,
        })
    }

    /// Every item of a plan in listing order, without details.
    pub fn list_all_items(&self, plan_id: &str) -> Result<Vec<TravelItem>> {
        list_items_of(&self.connection, plan_id)
    }

    /// Patches an item and optionally replaces its detail record, atomically.
    ///
    /// Returns the number of item rows changed. The item type never changes;
    /// a detail payload must match it.
    pub fn update_item(
        &mut self,
        id: &str,
        patch: &Patch,
        details: Option<&ItemDetails>,
    ) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let item_type = item_type_of(&tx, id)?
            .ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, id))?;

        let changed = apply_patch(&tx, PatchTarget::TravelItem, id, patch)?;
        if let Some(details) = details {
            validate_details(item_type, details)?;
            replace_details(&tx, id, item_type, details)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(changed)
    }

    /// Deletes an item. Relations, annotations and details go with it; budget
    /// lines linked to it are kept with the link cleared.
    pub fn delete_item(&self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_ITEM_SQL, params![id])
            .db_context("Failed to delete item")?;
        Ok(deleted > 0)
    }

    /// Copies every item of one plan into another in a single transaction.
    ///
    /// Copies get fresh ids, status reset to the default, `creator` as their
    /// creator, and a copy of their detail record.
    pub(crate) fn copy_items(&mut self, from_plan: &str, to_plan: &str, creator: &str) -> Result<u32> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let originals = list_items_of(&tx, from_plan)?;
        let now = current_timestamp();
        let mut copied = 0u32;

        for original in originals {
            let details = load_details(&tx, &original.id, original.item_type)?;
            let copy = TravelItem {
                id: new_id(),
                plan_id: to_plan.to_string(),
                status: DEFAULT_ITEM_STATUS.to_string(),
                created_by: Some(creator.to_string()),
                created_at: now,
                updated_at: now,
                details: None,
                ..original
            };
            insert_item(&tx, &copy)?;
            if let Some(details) = &details {
                insert_details(&tx, &copy.id, copy.item_type, details)?;
            }
            copied += 1;
        }

        tx.commit().db_context("Failed to commit item copies")?;
        Ok(copied)
    }
}

fn list_items_of(conn: &Connection, plan_id: &str) -> Result<Vec<TravelItem>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM travel_items WHERE plan_id = ?1 {ITEM_ORDER}"
        ))
        .db_context("Failed to prepare query")?;

    let rows = stmt
        .query_map(params![plan_id], super::Database::build_item_from_row)
        .db_context("Failed to query items")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch items");
    rows
}

fn insert_item(conn: &Connection, item: &TravelItem) -> Result<()> {
    conn.execute(
        INSERT_ITEM_SQL,
        params![
            &item.id,
            &item.plan_id,
            item.item_type.as_str(),
            &item.name,
            &item.description,
            item.latitude,
            item.longitude,
            item.altitude,
            &item.address,
            item.start_datetime.map(|dt| dt.to_string()),
            item.end_datetime.map(|dt| dt.to_string()),
            item.duration_hours,
            item.cost,
            item.priority,
            &item.status,
            &item.booking_status,
            to_json(&item.properties)?,
            to_json(&item.images)?,
            &item.notes,
            to_json(&item.tags)?,
            item.order_index,
            &item.group_id,
            &item.created_by,
            format_timestamp(item.created_at),
            format_timestamp(item.updated_at),
        ],
    )
    .db_context("Failed to insert travel item")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tempfile::TempDir;

    use super::*;
    use crate::{db::Database, models::ItemType, params::CreatePlan};

    fn setup() -> (TempDir, Database, String) {
        let dir = TempDir::new().unwrap();
        let mut db = Database::new(dir.path().join("items.db")).unwrap();
        let plan = db
            .create_plan(
                "alice",
                &CreatePlan {
                    name: "Daocheng loop".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        (dir, db, plan.id)
    }

    #[test]
    fn test_create_item_applies_defaults() {
        let (_dir, mut db, plan_id) = setup();
        let item = db
            .create_item("alice", &CreateItem::new(&plan_id, ItemType::RestArea, "Sangdui"))
            .unwrap();
        assert_eq!(item.priority, DEFAULT_PRIORITY);
        assert_eq!(item.status, DEFAULT_ITEM_STATUS);
        assert_eq!(item.created_by.as_deref(), Some("alice"));

        let stored = db.get_item(&item.id).unwrap().unwrap();
        assert_eq!(stored, item);
    }

    #[test]
    fn test_unscheduled_items_sort_last() {
        let (_dir, mut db, plan_id) = setup();
        let mut later = CreateItem::new(&plan_id, ItemType::Attraction, "Pearl Lake");
        later.start_datetime = Some(date(2025, 10, 2).at(9, 0, 0, 0));
        let mut earlier = CreateItem::new(&plan_id, ItemType::Attraction, "Chonggu Temple");
        earlier.start_datetime = Some(date(2025, 10, 1).at(9, 0, 0, 0));

        db.create_item("alice", &CreateItem::new(&plan_id, ItemType::Other, "Souvenirs"))
            .unwrap();
        db.create_item("alice", &later).unwrap();
        db.create_item("alice", &earlier).unwrap();

        let names: Vec<_> = db
            .list_all_items(&plan_id)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["Chonggu Temple", "Pearl Lake", "Souvenirs"]);
    }
}
