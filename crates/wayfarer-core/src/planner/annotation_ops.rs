//! Annotation operations for the Planner.

use super::Planner;
use crate::{
    db::PatchTarget,
    error::{Result, TravelError},
    models::{ItemAnnotation, ResourceKind},
    params::{CreateAnnotation, Patch},
};

impl Planner {
    /// Leaves a note on an item of a plan the caller can view.
    pub async fn create_annotation(
        &self,
        user_id: &str,
        params: &CreateAnnotation,
    ) -> Result<ItemAnnotation> {
        params.validate()?;
        let user = user_id.to_string();
        let params = params.clone();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &params.item_id, ResourceKind::TravelItem)?;
            db.create_annotation(&user, &params)
        })
        .await
    }

    /// Annotations on an item, newest first.
    pub async fn list_annotations(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Vec<ItemAnnotation>> {
        let user = user_id.to_string();
        let item_id = item_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_viewer(&user, &item_id, ResourceKind::TravelItem)?;
            db.list_annotations(&item_id)
        })
        .await
    }

    /// Edits an annotation the caller created.
    pub async fn update_annotation(
        &self,
        user_id: &str,
        annotation_id: &str,
        patch: Patch,
    ) -> Result<ItemAnnotation> {
        let user = user_id.to_string();
        let annotation_id = annotation_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &annotation_id, ResourceKind::Annotation)?;
            db.apply_patch(PatchTarget::Annotation, &annotation_id, &patch)?;
            db.get_annotation(&annotation_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Annotation, &annotation_id))
        })
        .await
    }

    /// Deletes an annotation the caller created and returns it as it was.
    pub async fn delete_annotation(
        &self,
        user_id: &str,
        annotation_id: &str,
    ) -> Result<ItemAnnotation> {
        let user = user_id.to_string();
        let annotation_id = annotation_id.to_string();

        self.with_db(user_id, move |db| {
            db.require_owner(&user, &annotation_id, ResourceKind::Annotation)?;
            let annotation = db
                .get_annotation(&annotation_id)?
                .ok_or_else(|| TravelError::not_found(ResourceKind::Annotation, &annotation_id))?;
            db.delete_annotation(&annotation_id)?;
            Ok(annotation)
        })
        .await
    }
}
