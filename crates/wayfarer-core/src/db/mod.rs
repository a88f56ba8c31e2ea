//! Database operations and SQLite management for travel plans.
//!
//! This module owns the SQLite connection and provides specialized query
//! interfaces for each resource. Every submodule extends [`Database`] with the
//! queries for one concern:
//!
//! - [`plan_queries`]: plan CRUD, listing and duplication
//! - [`item_queries`]: travel item CRUD, filtered and paged listing
//! - [`detail_queries`]: per-type detail records, routed by item type
//! - [`relation_queries`]: item-to-item edges
//! - [`annotation_queries`]: notes, markers and ratings on items
//! - [`budget_queries`]: budget lines
//! - [`ownership`]: owner resolution and access checks
//! - [`patch`]: allow-listed partial updates
//!
//! Multi-table writes go through a [`rusqlite::Transaction`], which rolls back
//! when dropped without a commit.

use std::path::Path;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use rusqlite::{Connection, InterruptHandle};

use crate::error::{DatabaseResultExt, Result};

pub mod annotation_queries;
pub mod budget_queries;
pub mod detail_queries;
pub mod item_queries;
pub mod ownership;
pub mod patch;
pub mod plan_queries;
pub mod relation_queries;
pub(crate) mod rows;
pub mod schema;

pub use patch::{FieldKind, FieldSpec, PatchTarget};

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection, enables foreign keys and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Handle that aborts whatever statement this connection is running.
    ///
    /// Safe to call from another thread. An interrupted statement fails with
    /// `SQLITE_INTERRUPT` and any open transaction is rolled back on drop.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.connection.get_interrupt_handle()
    }

    /// Turns every later commit on this connection into a rollback once
    /// `abort` is set.
    ///
    /// Interrupting only stops a statement that is running; this also covers
    /// statements and commits that start after the flag is raised.
    pub fn abort_commits_when(&self, abort: Arc<AtomicBool>) {
        self.connection
            .commit_hook(Some(move || abort.load(Ordering::SeqCst)));
    }
}
