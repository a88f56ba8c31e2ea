//! High-level planner API for managing travel plans.
//!
//! [`Planner`] is the async facade every interface talks to. Each operation
//! takes the already-authenticated caller id first, checks it against the
//! optional [`RateLimiter`], resolves access through the ownership guard and
//! only then touches the store.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Planner ops    │    │  spawn_blocking │    │    Database     │
//! │ (plan_ops, ..)  │───▶│  + deadline     │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    access checks        one connection         transactions
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Plan CRUD, listing and duplication
//! - [`item_ops`]: Travel item CRUD and paging
//! - [`relation_ops`]: Item relations
//! - [`annotation_ops`]: Annotations on items
//! - [`budget_ops`]: Budget lines and their summary
//! - [`itinerary_ops`]: Daily itinerary and plan summary
//!
//! ## Access rules
//!
//! Reading anything that belongs to a plan requires being able to view the
//! plan: owning it, or it being public. Changing anything requires owning the
//! plan, except annotations, which only their creator may change. A missing
//! resource is reported as `NotFound` and a resource the caller may not touch
//! as `Unauthorized`.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use wayfarer_core::{params::CreatePlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/wayfarer.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(
//!         "alice",
//!         &CreatePlan {
//!             name: "Autumn in Daocheng".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::{sync::oneshot, task, time};

use crate::{
    db::Database,
    error::{Result, TravelError},
    rate_limit::RateLimiter,
};

pub mod annotation_ops;
pub mod budget_ops;
pub mod builder;
pub mod item_ops;
pub mod itinerary_ops;
pub mod plan_ops;
pub mod relation_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for managing plans and everything in them.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    rate_limiter: Option<Arc<RateLimiter>>,
    request_timeout: Duration,
}

impl Planner {
    pub(crate) fn new(
        db_path: PathBuf,
        rate_limiter: Option<Arc<RateLimiter>>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            db_path,
            rate_limiter,
            request_timeout,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Runs `op` for `user_id` on its own connection on the blocking pool.
    ///
    /// The caller is admitted by the rate limiter first. Once the request
    /// deadline passes, no commit on the connection succeeds any more and a
    /// running statement is interrupted, so the open transaction rolls back.
    /// The call then reports `Timeout`, unless `op` had already committed and
    /// finished, in which case its result is returned.
    pub(crate) async fn with_db<T, F>(&self, user_id: &str, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.check(user_id)?;
        }

        let db_path = self.db_path.clone();
        let deadline = self.request_timeout;
        let expired = Arc::new(AtomicBool::new(false));
        let (handle_tx, handle_rx) = oneshot::channel();

        let worker_expired = Arc::clone(&expired);
        let mut work = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.abort_commits_when(Arc::clone(&worker_expired));
            // The receiver is gone only if the caller stopped waiting
            let _ = handle_tx.send(db.interrupt_handle());
            if worker_expired.load(Ordering::SeqCst) {
                return Err(TravelError::Timeout { after: deadline });
            }
            op(&mut db).map_err(|e| {
                if worker_expired.load(Ordering::SeqCst) {
                    TravelError::Timeout { after: deadline }
                } else {
                    e
                }
            })
        });

        match time::timeout(deadline, &mut work).await {
            Ok(joined) => flatten_join(joined),
            Err(_) => {
                expired.store(true, Ordering::SeqCst);
                if let Ok(handle) = handle_rx.await {
                    handle.interrupt();
                }
                // Work that finished before the flag was raised is committed
                match flatten_join(work.await) {
                    Ok(value) => Ok(value),
                    Err(_) => Err(TravelError::Timeout { after: deadline }),
                }
            }
        }
    }
}

fn flatten_join<T>(joined: std::result::Result<Result<T>, task::JoinError>) -> Result<T> {
    joined.map_err(|e| TravelError::Configuration {
        message: format!("Task join error: {e}"),
    })?
}
