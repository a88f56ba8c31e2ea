//! Budget operations for the Planner.

use super::Planner;
use crate::{
    db::PatchTarget,
    error::{Result, TravelError},
    itinerary::build_budget_summary,
    models::{BudgetItem, BudgetSummary, ResourceKind},
    params::{CreateBudgetItem, Patch},
};

impl Planner {
    /// Adds a budget line to one of the caller's plans.
    pub async fn create_budget_item(
        &self,
        user_id: &str,
        params: &CreateBudgetItem,
    ) -> Result<BudgetItem> {
        params.validate()?;
        let user = user_id.to_string();
        let params = params.clone();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &params.plan_id, ResourceKind::Plan)?;
            db.create_budget_item(&params)
        })
        .await
    }

    /// A plan's budget lines in the order they were added.
    pub async fn list_budget_items(&self, user_id: &str, plan_id: &str) -> Result<Vec<BudgetItem>> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            db.list_budget_items(&plan_id)
        })
        .await
    }

    pub async fn update_budget_item(
        &self,
        user_id: &str,
        budget_item_id: &str,
        patch: Patch,
    ) -> Result<BudgetItem> {
        let user = user_id.to_string();
        let id = budget_item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &id, ResourceKind::BudgetItem)?;
            db.apply_patch(PatchTarget::BudgetItem, &id, &patch)?;
            db.get_budget_item(&id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::BudgetItem, &id))
        })
        .await
    }

    /// Deletes a budget line and returns it as it was.
    pub async fn delete_budget_item(&self, user_id: &str, budget_item_id: &str) -> Result<BudgetItem> {
        let user = user_id.to_string();
        let id = budget_item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &id, ResourceKind::BudgetItem)?;
            let budget_item = db
                .get_budget_item(&id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::BudgetItem, &id))?;
            db.delete_budget_item(&id)?;
            Ok(budget_item)
        })
        .await
    }

    /// Budget ceiling against estimated and actual spend.
    pub async fn budget_summary(&self, user_id: &str, plan_id: &str) -> Result<BudgetSummary> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            let plan = db
                .get_plan(&plan_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Plan, &plan_id))?;
            let lines = db.list_budget_items(&plan_id)?;
            Ok(build_budget_summary(&plan, &lines))
        })
        .await
    }
}
