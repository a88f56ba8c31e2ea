//! Core library for the Wayfarer travel planner.
//!
//! This crate holds everything behind the interfaces: the SQLite store for
//! plans and their travel items, the ownership guard deciding who may read or
//! change what, the derived itinerary and budget views, and the async
//! [`Planner`] facade that ties them together under a rate limit and a
//! per-request deadline.
//!
//! # Layers
//!
//! - **Models** ([`models`]): Plain records and derived views
//! - **Parameters** ([`params`]): Validated operation inputs
//! - **Store** ([`db`]): Queries, whitelisted patches and transactions
//! - **Planner** ([`planner`]): Access checks, deadlines and rate limiting
//! - **Display** ([`display`]): Markdown rendering for the terminal
//!
//! # Quick Start
//!
//! ```rust
//! use wayfarer_core::{
//!     models::ItemType,
//!     params::{CreateItem, CreatePlan},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("trip.db"))
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
//!
//! let lake = CreateItem::new(plan.id.clone(), ItemType::Attraction, "Milk Lake");
//! planner.create_item("alice", &lake).await?;
//!
//! for day in planner.daily_itinerary("alice", &plan.id).await? {
//!     println!("{day}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod itinerary;
pub mod models;
pub mod params;
pub mod planner;
pub mod rate_limit;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{Result, TravelError};
pub use models::{
    BudgetItem, ItemAnnotation, ItemDetails, ItemRelation, ItemType, Plan, PlanStatus, TravelItem,
    Visibility,
};
pub use params::{CreateAnnotation, CreateBudgetItem, CreateItem, CreatePlan, Patch, UpsertRelation};
pub use planner::{Planner, PlannerBuilder};
pub use rate_limit::RateLimiter;
