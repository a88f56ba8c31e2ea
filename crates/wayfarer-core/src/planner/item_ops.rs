//! Travel item operations for the Planner.

use super::Planner;
use crate::{
    error::{Result, TravelError},
    models::{ItemPage, ItemQuery, ResourceKind, TravelItem},
    params::{CreateItem, UpdateItem},
};

impl Planner {
    /// Adds an item, and its detail record if given, to one of the caller's
    /// plans.
    pub async fn create_item(&self, user_id: &str, params: &CreateItem) -> Result<TravelItem> {
        params.validate()?;
        let user = user_id.to_string();
        let params = params.clone();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &params.plan_id, ResourceKind::Plan)?;
            db.create_item(&user, &params)
        })
        .await
    }

    /// Lists one page of a plan's items.
    pub async fn list_items(
        &self,
        user_id: &str,
        plan_id: &str,
        query: ItemQuery,
    ) -> Result<ItemPage> {
        let user = user_id.to_string();
        let plan_id = plan_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &plan_id, ResourceKind::Plan)?;
            db.list_items(&plan_id, &query)
        })
        .await
    }

    /// Retrieves an item with its detail record.
    pub async fn get_item(&self, user_id: &str, item_id: &str) -> Result<TravelItem> {
        let user = user_id.to_string();
        let item_id = item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &item_id, ResourceKind::TravelItem)?;
            db.get_item(&item_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, &item_id))
        })
        .await
    }

    /// Patches an item and optionally replaces its detail record, then
    /// returns the item as stored.
    pub async fn update_item(&self, user_id: &str, params: UpdateItem) -> Result<TravelItem> {
        let user = user_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &params.item_id, ResourceKind::TravelItem)?;
            db.update_item(&params.item_id, &params.patch, params.details.as_ref())?;
            db.get_item(&params.item_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, &params.item_id))
        })
        .await
    }

    /// Deletes an item and returns it as it was.
    pub async fn delete_item(&self, user_id: &str, item_id: &str) -> Result<TravelItem> {
        let user = user_id.to_string();
        let item_id = item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &item_id, ResourceKind::TravelItem)?;
            let item = db
                .get_item(&item_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, &item_id))?;
            db.delete_item(&item_id)?;
            Ok(item)
        })
        .await
    }
}
