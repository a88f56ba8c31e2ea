//! Command handlers.
//!
//! Each handler calls one planner operation as the configured user and
//! renders the outcome through the display wrappers of `wayfarer_core`.

use anyhow::{bail, Result};
use log::{debug, info};
use wayfarer_core::{
    db::PatchTarget,
    display::{Annotations, BudgetItems, ItemPageView, Itinerary, Plans, Relations},
    models::{ItemQuery, PlanFilter},
    params::{Patch, UpdateItem},
    CreateResult, DeleteResult, OperationStatus, Planner, UpdateResult,
};

use crate::{
    args::{BudgetCommands, ItemCommands, NoteCommands, PlanCommands, RelationCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    user: String,
}

/// Names of the patch keys the resource accepts, in the order given.
fn accepted_fields(target: PatchTarget, patch: &Patch) -> Vec<String> {
    let (accepted, ignored): (Vec<_>, Vec<_>) =
        patch.keys().partition(|key| target.field(key).is_some());
    if !ignored.is_empty() {
        debug!("Ignoring fields not editable on {target:?}: {ignored:?}");
    }
    accepted.into_iter().cloned().collect()
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, user: impl Into<String>) -> Self {
        Self {
            planner,
            renderer,
            user: user.into(),
        }
    }

    pub async fn list_plans(&self, filter: PlanFilter) -> Result<()> {
        let plans = self.planner.list_plans(&self.user, filter).await?;
        self.renderer.show(&Plans(plans))
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(user, &args.into()).await?;
                info!("Created plan {}", plan.id);
                self.renderer.show(&CreateResult::new(plan))
            }
            PlanCommands::List(args) => match &args.owner {
                Some(owner) => {
                    let plans = self.planner.list_public_plans(user, owner).await?;
                    self.renderer.show(&Plans(plans))
                }
                None => self.list_plans(PlanFilter::from(&args)).await,
            },
            PlanCommands::Show(args) => {
                let plan = self.planner.get_plan(user, &args.id).await?;
                self.renderer.show(&plan)
            }
            PlanCommands::Update { id, set } => {
                let patch = Patch::from(set);
                let changes = accepted_fields(PatchTarget::Plan, &patch);
                let plan = self.planner.update_plan(user, &id, patch).await?;
                self.renderer.show(&UpdateResult::with_changes(plan, changes))
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Deleting plan {} also removes everything in it. Re-run with --confirm to proceed.",
                        args.id
                    );
                }
                let plan = self.planner.delete_plan(user, &args.id).await?;
                info!("Deleted plan {}", plan.id);
                self.renderer.show(&DeleteResult::new(plan))
            }
            PlanCommands::Duplicate(args) => {
                let outcome = self.planner.duplicate_plan(user, &args.id).await?;
                info!(
                    "Duplicated plan {} into {} ({} items)",
                    args.id, outcome.plan.id, outcome.copied_items
                );
                self.renderer.show(&outcome)
            }
            PlanCommands::Itinerary(args) => {
                let days = self.planner.daily_itinerary(user, &args.id).await?;
                self.renderer.show(&Itinerary(days))
            }
            PlanCommands::Summary(args) => {
                let summary = self.planner.plan_summary(user, &args.id).await?;
                self.renderer.show(&summary)
            }
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            ItemCommands::Add(args) => {
                let item = self.planner.create_item(user, &args.into()).await?;
                info!("Added item {} to plan {}", item.id, item.plan_id);
                self.renderer.show(&CreateResult::new(item))
            }
            ItemCommands::List(args) => {
                let query = ItemQuery::from(&args);
                let page = self.planner.list_items(user, &args.plan_id, query).await?;
                self.renderer.show(&ItemPageView(&page))
            }
            ItemCommands::Show(args) => {
                let item = self.planner.get_item(user, &args.id).await?;
                self.renderer.show(&item)
            }
            ItemCommands::Update(args) => {
                let params = UpdateItem::from(args);
                let mut changes = accepted_fields(PatchTarget::TravelItem, &params.patch);
                if params.details.is_some() {
                    changes.push("details".to_string());
                }
                let item = self.planner.update_item(user, params).await?;
                self.renderer.show(&UpdateResult::with_changes(item, changes))
            }
            ItemCommands::Delete(args) => {
                let item = self.planner.delete_item(user, &args.id).await?;
                self.renderer.show(&DeleteResult::new(item))
            }
        }
    }

    pub async fn handle_relation_command(&self, command: RelationCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            RelationCommands::Link(args) => {
                let relation = self.planner.upsert_relation(user, &args.into()).await?;
                self.renderer.show(&CreateResult::new(relation))
            }
            RelationCommands::List(args) => {
                let relations = self.planner.list_relations(user, &args.id).await?;
                self.renderer.show(&Relations(relations))
            }
            RelationCommands::Unlink(args) => {
                let status = if self.planner.delete_relation(user, &args.id).await? {
                    OperationStatus::success(format!("Removed relation {}", args.id))
                } else {
                    OperationStatus::failure(format!("No relation with ID {}", args.id))
                };
                self.renderer.show(&status)
            }
        }
    }

    pub async fn handle_note_command(&self, command: NoteCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            NoteCommands::Add(args) => {
                let note = self.planner.create_annotation(user, &args.into()).await?;
                self.renderer.show(&CreateResult::new(note))
            }
            NoteCommands::List(args) => {
                let notes = self.planner.list_annotations(user, &args.id).await?;
                self.renderer.show(&Annotations(notes))
            }
            NoteCommands::Update { id, set } => {
                let patch = Patch::from(set);
                let changes = accepted_fields(PatchTarget::Annotation, &patch);
                let note = self.planner.update_annotation(user, &id, patch).await?;
                self.renderer.show(&UpdateResult::with_changes(note, changes))
            }
            NoteCommands::Delete(args) => {
                let note = self.planner.delete_annotation(user, &args.id).await?;
                self.renderer.show(&DeleteResult::new(note))
            }
        }
    }

    pub async fn handle_budget_command(&self, command: BudgetCommands) -> Result<()> {
        let user = self.user.as_str();
        match command {
            BudgetCommands::Add(args) => {
                let line = self.planner.create_budget_item(user, &args.into()).await?;
                self.renderer.show(&CreateResult::new(line))
            }
            BudgetCommands::List(args) => {
                let lines = self.planner.list_budget_items(user, &args.id).await?;
                self.renderer.show(&BudgetItems(lines))
            }
            BudgetCommands::Update { id, set } => {
                let patch = Patch::from(set);
                let changes = accepted_fields(PatchTarget::BudgetItem, &patch);
                let line = self.planner.update_budget_item(user, &id, patch).await?;
                self.renderer.show(&UpdateResult::with_changes(line, changes))
            }
            BudgetCommands::Delete(args) => {
                let line = self.planner.delete_budget_item(user, &args.id).await?;
                self.renderer.show(&DeleteResult::new(line))
            }
            BudgetCommands::Summary(args) => {
                let summary = self.planner.budget_summary(user, &args.id).await?;
                self.renderer.show(&summary)
            }
        }
    }
}
