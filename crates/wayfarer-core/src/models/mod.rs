//! Data models for plans, travel items and everything hanging off them.
//!
//! This module contains the domain records persisted by [`crate::db`] and the
//! derived views computed by [`crate::itinerary`]. Display implementations
//! live in [`crate::display::models`] so the records stay plain data.
//!
//! # Ownership chain
//!
//! ```text
//! Plan ─┬─▶ TravelItem ─┬─▶ ItemDetails (0..1, keyed by item id)
//!       │               ├─▶ ItemRelation (as source or target)
//!       │               └─▶ ItemAnnotation
//!       └─▶ BudgetItem ──(optional link)──▶ TravelItem
//! ```
//!
//! Deleting a plan removes everything to its right; deleting an item clears
//! the link on budget lines instead of removing them.
//!
//! # Examples
//!
//! ```rust
//! use wayfarer_core::models::{ItemDetails, ItemType, TransportDetails};
//!
//! let details = ItemDetails::Transport(TransportDetails {
//!     carrier_name: Some("Sichuan Airlines".to_string()),
//!     ..Default::default()
//! });
//! assert!(details.accepts(ItemType::Transport));
//! assert!(!details.accepts(ItemType::Accommodation));
//! ```

pub mod budget;
pub mod details;
pub mod filters;
pub mod item;
pub mod plan;
pub mod relation;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use budget::{BudgetItem, DEFAULT_CURRENCY, DEFAULT_PAYMENT_STATUS};
pub use details::{
    AccommodationDetails, AttractionDetails, DetailFamily, ItemDetails, TransportDetails,
};
pub use filters::{ItemPage, ItemQuery, PlanFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use item::{TravelItem, DEFAULT_ITEM_STATUS, DEFAULT_PRIORITY};
pub use plan::{Plan, COPY_SUFFIX, DEFAULT_DESTINATION};
pub use relation::{ItemAnnotation, ItemRelation};
pub use status::{ItemType, PlanStatus, ResourceKind, Visibility};
pub use summary::{
    BudgetSummary, DailyItinerary, DuplicateOutcome, DuplicateStatus, PlanSummary, TypeTotals,
};
