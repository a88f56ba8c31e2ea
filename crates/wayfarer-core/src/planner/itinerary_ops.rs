//! Itinerary and summary views for the Planner.

use super::Planner;
use crate::{
    error::Result,
    itinerary::{build_daily_itinerary, build_plan_summary},
    models::{DailyItinerary, PlanSummary, ResourceKind},
};

impl Planner {
    /// A plan's scheduled items grouped by day, earliest day first.
    pub async fn daily_itinerary(&self, user_id: &str, plan_id: &str) -> Result<Vec<DailyItinerary>> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            let items = db.list_all_items(&plan_id)?;
            Ok(build_daily_itinerary(&items))
        })
        .await
    }

    /// Counts, costs and date span across a plan's items and budget lines.
    pub async fn plan_summary(&self, user_id: &str, plan_id: &str) -> Result<PlanSummary> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            let items = db.list_all_items(&plan_id)?;
            let budget_items = db.list_budget_items(&plan_id)?;
            Ok(build_plan_summary(&plan_id, &items, &budget_items))
        })
        .await
    }
}
