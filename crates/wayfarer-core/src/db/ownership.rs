//! Owner resolution and access checks.
//!
//! Every resource resolves to exactly one owning user: plans directly, items
//! and budget lines through their plan, relations through their source item's
//! plan, and annotations through their creator. [`Database::authorize`]
//! answers allow/deny without ever failing on a missing resource, so callers
//! cannot tell "absent" from "not yours" unless they also ask
//! [`Database::exists`].
//!
//! [`Database`]: super::Database

use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{ResourceKind, Visibility},
};

const PLAN_OWNER_SQL: &str = "SELECT user_id FROM plans WHERE id = ?1";
const ITEM_OWNER_SQL: &str = "SELECT p.user_id FROM travel_items i \
     JOIN plans p ON p.id = i.plan_id WHERE i.id = ?1";
const RELATION_OWNER_SQL: &str = "SELECT p.user_id FROM item_relations r \
     JOIN travel_items i ON i.id = r.source_item_id \
     JOIN plans p ON p.id = i.plan_id WHERE r.id = ?1";
const ANNOTATION_OWNER_SQL: &str = "SELECT created_by FROM item_annotations WHERE id = ?1";
const BUDGET_OWNER_SQL: &str = "SELECT p.user_id FROM budget_items b \
     JOIN plans p ON p.id = b.plan_id WHERE b.id = ?1";

const PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const ITEM_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM travel_items WHERE id = ?1)";
const RELATION_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM item_relations WHERE id = ?1)";
const ANNOTATION_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM item_annotations WHERE id = ?1)";
const BUDGET_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM budget_items WHERE id = ?1)";

// Owner and visibility of the plan a resource belongs to
const PLAN_ACCESS_SQL: &str = "SELECT user_id, visibility FROM plans WHERE id = ?1";
const ITEM_ACCESS_SQL: &str = "SELECT p.user_id, p.visibility FROM travel_items i \
     JOIN plans p ON p.id = i.plan_id WHERE i.id = ?1";
const RELATION_ACCESS_SQL: &str = "SELECT p.user_id, p.visibility FROM item_relations r \
     JOIN travel_items i ON i.id = r.source_item_id \
     JOIN plans p ON p.id = i.plan_id WHERE r.id = ?1";
const ANNOTATION_ACCESS_SQL: &str = "SELECT p.user_id, p.visibility FROM item_annotations a \
     JOIN travel_items i ON i.id = a.item_id \
     JOIN plans p ON p.id = i.plan_id WHERE a.id = ?1";
const BUDGET_ACCESS_SQL: &str = "SELECT p.user_id, p.visibility FROM budget_items b \
     JOIN plans p ON p.id = b.plan_id WHERE b.id = ?1";

impl super::Database {
    /// The user who owns `resource_id`, or `None` if it does not exist.
    pub fn owner_of(&self, resource_id: &str, kind: ResourceKind) -> Result<Option<String>> {
        let sql = match kind {
            ResourceKind::Plan => PLAN_OWNER_SQL,
            ResourceKind::TravelItem => ITEM_OWNER_SQL,
            ResourceKind::Relation => RELATION_OWNER_SQL,
            ResourceKind::Annotation => ANNOTATION_OWNER_SQL,
            ResourceKind::BudgetItem => BUDGET_OWNER_SQL,
        };
        self.connection
            .query_row(sql, params![resource_id], |row| row.get(0))
            .optional()
            .db_context("Failed to resolve resource owner")
    }

    /// Whether `user_id` owns `resource_id`.
    ///
    /// A missing resource yields `Ok(false)`; only store failures are errors.
    pub fn authorize(&self, user_id: &str, resource_id: &str, kind: ResourceKind) -> Result<bool> {
        Ok(self
            .owner_of(resource_id, kind)?
            .is_some_and(|owner| owner == user_id))
    }

    pub fn exists(&self, resource_id: &str, kind: ResourceKind) -> Result<bool> {
        let sql = match kind {
            ResourceKind::Plan => PLAN_EXISTS_SQL,
            ResourceKind::TravelItem => ITEM_EXISTS_SQL,
            ResourceKind::Relation => RELATION_EXISTS_SQL,
            ResourceKind::Annotation => ANNOTATION_EXISTS_SQL,
            ResourceKind::BudgetItem => BUDGET_EXISTS_SQL,
        };
        self.connection
            .query_row(sql, params![resource_id], |row| row.get(0))
            .db_context("Failed to check resource existence")
    }

    /// Fails with `NotFound` or `Unauthorized` unless `user_id` owns the
    /// resource.
    pub fn require_owner(&self, user_id: &str, resource_id: &str, kind: ResourceKind) -> Result<()> {
        if self.authorize(user_id, resource_id, kind)? {
            return Ok(());
        }
        Err(self.denial(resource_id, kind)?)
    }

    /// Fails unless `user_id` may read the resource: they own the plan it
    /// belongs to, or that plan is public.
    pub fn require_viewer(
        &self,
        user_id: &str,
        resource_id: &str,
        kind: ResourceKind,
    ) -> Result<()> {
        let sql = match kind {
            ResourceKind::Plan => PLAN_ACCESS_SQL,
            ResourceKind::TravelItem => ITEM_ACCESS_SQL,
            ResourceKind::Relation => RELATION_ACCESS_SQL,
            ResourceKind::Annotation => ANNOTATION_ACCESS_SQL,
            ResourceKind::BudgetItem => BUDGET_ACCESS_SQL,
        };
        let access: Option<(String, String)> = self
            .connection
            .query_row(sql, params![resource_id], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()
            .db_context("Failed to resolve resource visibility")?;

        match access {
            None => Err(TravelError::not_found(kind, resource_id)),
            Some((owner, visibility)) => {
                let public = visibility == Visibility::Public.as_str();
                if owner == user_id || public {
                    Ok(())
                } else {
                    Err(TravelError::unauthorized(kind, resource_id))
                }
            }
        }
    }

    fn denial(&self, resource_id: &str, kind: ResourceKind) -> Result<TravelError> {
        if self.exists(resource_id, kind)? {
            Ok(TravelError::unauthorized(kind, resource_id))
        } else {
            Ok(TravelError::not_found(kind, resource_id))
        }
    }
}
