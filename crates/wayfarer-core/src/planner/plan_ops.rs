//! Plan operations for the Planner.

use super::Planner;
use crate::{
    db::PatchTarget,
    error::{Result, TravelError},
    models::{DuplicateOutcome, Plan, PlanFilter, ResourceKind},
    params::{CreatePlan, Patch},
};

impl Planner {
    /// Creates a plan owned by `user_id`.
    pub async fn create_plan(&self, user_id: &str, params: &CreatePlan) -> Result<Plan> {
        params.validate()?;
        let user = user_id.to_string();
        let params = params.clone();

        self.with_db(user_id, move |db| db.create_plan(&user, &params))
            .await
    }

    /// Lists the caller's own plans, newest first.
    pub async fn list_plans(&self, user_id: &str, filter: PlanFilter) -> Result<Vec<Plan>> {
        let user = user_id.to_string();

        self.with_db(user_id, move |db| db.list_plans(&user, &filter))
            .await
    }

    /// Lists the public plans of `owner_id`.
    pub async fn list_public_plans(&self, user_id: &str, owner_id: &str) -> Result<Vec<Plan>> {
        let owner = owner_id.to_string();

        self.with_db(user_id, move |db| db.list_public_plans(&owner))
            .await
    }

    /// Retrieves one of the caller's plans.
    pub async fn get_plan(&self, user_id: &str, plan_id: &str) -> Result<Plan> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &plan_id, ResourceKind::Plan)?;
            db.get_plan(&plan_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Plan, &plan_id))
        })
        .await
    }

    /// Applies the allow-listed fields of `patch` and returns the plan as
    /// stored afterwards.
    pub async fn update_plan(&self, user_id: &str, plan_id: &str, patch: Patch) -> Result<Plan> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &plan_id, ResourceKind::Plan)?;
            db.apply_patch(PatchTarget::Plan, &plan_id, &patch)?;
            db.get_plan(&plan_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Plan, &plan_id))
        })
        .await
    }

    /// Deletes a plan with all its items, relations, annotations and budget
    /// lines. Returns the plan as it was.
    pub async fn delete_plan(&self, user_id: &str, plan_id: &str) -> Result<Plan> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &plan_id, ResourceKind::Plan)?;
            let plan = db
                .get_plan(&plan_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Plan, &plan_id))?;
            if !db.delete_plan(&plan_id)? {
                return Err(TravelError::not_found(ResourceKind::Plan, &plan_id));
            }
            Ok(plan)
        })
        .await
    }

    /// Copies a plan the caller can view into a new private draft they own.
    ///
    /// See [`DuplicateOutcome`] for how a failed item copy is reported.
    pub async fn duplicate_plan(&self, user_id: &str, plan_id: &str) -> Result<DuplicateOutcome> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            db.duplicate_plan(&plan_id, &user)
        })
        .await
    }
}
