//! Markdown rendering of domain records and operation outcomes.
//!
//! Domain models implement `Display` directly (see [`models`]); groups of
//! records and operation outcomes are wrapped in newtypes so each context
//! picks its own framing.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │    Markdown     │
//! │ (Plan, Item ..) │───▶│ Result Types    │───▶│    (terminal)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Plans, Itinerary, Relations, ..)
//! - [`results`]: Operation outcomes (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: One-line confirmations (OperationStatus)
//! - [`datetime`]: Timestamp and schedule formatting
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{
    Annotations, BudgetItems, ItemPageView, Itinerary, Plans, Relations, TravelItems,
};
pub use datetime::{LocalDateTime, Schedule};
pub use results::{CreateResult, DeleteResult, Labeled, UpdateResult};
pub use status::OperationStatus;
