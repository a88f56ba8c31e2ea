//! Relation operations for the Planner.

use super::Planner;
use crate::{
    error::Result,
    models::{ItemRelation, ResourceKind},
    params::UpsertRelation,
};

impl Planner {
    /// Links two items of one of the caller's plans, or updates the
    /// properties of an existing link with the same type.
    pub async fn upsert_relation(
        &self,
        user_id: &str,
        params: &UpsertRelation,
    ) -> Result<ItemRelation> {
        params.validate()?;
        let user = user_id.to_string();
        let params = params.clone();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &params.source_item_id, ResourceKind::TravelItem)?;
            db.require_owner(&user, &params.target_item_id, ResourceKind::TravelItem)?;
            db.upsert_relation(&params)
        })
        .await
    }

    /// Relations where the item is either end.
    pub async fn list_relations(&self, user_id: &str, item_id: &str) -> Result<Vec<ItemRelation>> {
        let user = user_id.to_string();
        let item_id = item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &item_id, ResourceKind::TravelItem)?;
            db.list_relations(&item_id)
        })
        .await
    }

    /// Removes a relation.
    ///
    /// Returns `false` when the caller owns nothing by that id; an existing
    /// relation in someone else's plan is still `Unauthorized`.
    pub async fn delete_relation(&self, user_id: &str, relation_id: &str) -> Result<bool> {
        let user = user_id.to_string();
        let relation_id = relation_id.to_string();

        self.with_db(user_id, move |db| {
            if !db.exists(&relation_id, ResourceKind::Relation)? {
                return Ok(false);
            }
            db.require_owner(&user, &relation_id, ResourceKind::Relation)?;
            db.delete_relation(&relation_id)
        })
        .await
    }
}
