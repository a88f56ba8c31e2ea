//! Database schema initialization.
//!
//! Every statement in the embedded schema is `CREATE ... IF NOT EXISTS`, so
//! running it on each open is safe for both new and existing files.

use crate::error::{DatabaseResultExt, Result};

const SCHEMA_SQL: &str = include_str!("../../assets/schema.sql");

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascades and SET NULL links depend on this, per connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        self.connection
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::{db::Database, params::CreatePlan};

    #[test]
    fn test_reopening_keeps_existing_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reopen.db");

        let mut db = Database::new(&path).unwrap();
        let plan = db
            .create_plan(
                "alice",
                &CreatePlan {
                    name: "Kept".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        drop(db);

        let db = Database::new(&path).unwrap();
        assert!(db.get_plan(&plan.id).unwrap().is_some());
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fk.db");
        let _db = Database::new(&path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
        let orphan = conn.execute(
            "INSERT INTO travel_items (id, plan_id, item_type, name, created_at, updated_at)
             VALUES ('i1', 'missing', 'other', 'Orphan', 'now', 'now')",
            [],
        );
        assert!(orphan.is_err());
    }
}
