//! Command-line argument definitions using clap.
//!
//! Every argument struct converts into the matching core parameter type with
//! `From`, so clap attributes never leak into `wayfarer_core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Updates take repeated `--set field=value` pairs. The value is read as JSON
//! when it parses (`--set cost=120`, `--set tags='["a","b"]'`) and as a plain
//! string otherwise (`--set name=Riwa`). Unknown fields are ignored by the
//! core.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::{
    civil::{Date, DateTime},
    Timestamp,
};
use serde_json::{Map, Value};
use wayfarer_core::{
    models::{ItemDetails, ItemQuery, ItemType, PlanFilter, PlanStatus, Visibility},
    params::{
        CreateAnnotation, CreateBudgetItem, CreateItem, CreatePlan, Patch, UpdateItem,
        UpsertRelation,
    },
};

/// Wayfarer plans trips: plans hold scheduled travel items, links between
/// them, notes and budget lines.
#[derive(Parser)]
#[command(version, about, name = "wf")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/wayfarer/wayfarer.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Identity the commands act as
    #[arg(long, global = true, env = "WAYFARER_USER", default_value = "local")]
    pub user: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage travel items within plans
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Link items to each other
    #[command(alias = "r")]
    Relation {
        #[command(subcommand)]
        command: RelationCommands,
    },
    /// Leave notes on items
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Track a plan's budget
    #[command(alias = "b")]
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
}

/// Splits `field=value`, reading the value as JSON with a string fallback.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

fn parse_details(raw: &str) -> Result<ItemDetails, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid details JSON: {e}"))
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

/// Repeated `--set` pairs shared by every update command.
#[derive(ClapArgs)]
pub struct SetArgs {
    /// Field assignment as field=value; repeat for several fields
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, Value)>,
}

impl From<SetArgs> for Patch {
    fn from(val: SetArgs) -> Self {
        val.assignments.into_iter().collect()
    }
}

/// A resource picked by its id.
#[derive(ClapArgs)]
pub struct IdArg {
    pub id: String,
}

// ============================================================================
// Plans
// ============================================================================

/// Create a new plan
#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Where the trip goes; defaults to Daocheng Yading
    #[arg(long)]
    pub destination: Option<String>,
    /// First day, as YYYY-MM-DD
    #[arg(long)]
    pub start: Option<Date>,
    /// Last day, as YYYY-MM-DD
    #[arg(long)]
    pub end: Option<Date>,
    /// Spending ceiling
    #[arg(long)]
    pub budget: Option<f64>,
    #[arg(long)]
    pub participants: Option<u32>,
    /// Let anyone read the plan
    #[arg(long)]
    pub public: bool,
    /// Tags as comma-separated list
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            name: val.name,
            description: val.description,
            destination: val.destination,
            start_date: val.start,
            end_date: val.end,
            budget: val.budget,
            participants: val.participants,
            visibility: val.public.then_some(Visibility::Public),
            tags: val.tags,
        }
    }
}

/// List plans
///
/// Without `--owner`, lists your own plans newest first. With it, lists that
/// user's public plans.
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans in this status (draft, active, completed, archived)
    #[arg(short, long)]
    pub status: Option<PlanStatus>,
    /// Show another user's public plans instead
    #[arg(long, conflicts_with = "status")]
    pub owner: Option<String>,
}

impl From<&ListPlansArgs> for PlanFilter {
    fn from(val: &ListPlansArgs) -> Self {
        PlanFilter { status: val.status }
    }
}

/// Delete a plan and everything in it
#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    pub id: String,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show one of your plans
    #[command(alias = "s")]
    Show(IdArg),
    /// Change plan fields
    #[command(alias = "u")]
    Update {
        id: String,
        #[command(flatten)]
        set: SetArgs,
    },
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Copy a plan you can see into a new private draft
    #[command(alias = "dup")]
    Duplicate(IdArg),
    /// Show the plan day by day
    Itinerary(IdArg),
    /// Show counts, costs and the date span
    Summary(IdArg),
}

// ============================================================================
// Items
// ============================================================================

/// Add a travel item to a plan
#[derive(ClapArgs)]
pub struct AddItemArgs {
    pub plan_id: String,
    /// accommodation, transport, attraction, photo_spot, rest_area,
    /// checkpoint or other
    pub item_type: ItemType,
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Start, as YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub start: Option<DateTime>,
    /// End, as YYYY-MM-DDTHH:MM
    #[arg(long)]
    pub end: Option<DateTime>,
    #[arg(long)]
    pub cost: Option<f64>,
    /// 1 (low) to 5 (high)
    #[arg(long)]
    pub priority: Option<u8>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Altitude in meters
    #[arg(long, allow_hyphen_values = true)]
    pub altitude: Option<i64>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Position among items without a start
    #[arg(long)]
    pub order: Option<i64>,
    /// Type-specific record as JSON, e.g. '{"kind":"transport","carrier_name":"..."}'
    #[arg(long, value_parser = parse_details)]
    pub details: Option<ItemDetails>,
}

impl From<AddItemArgs> for CreateItem {
    fn from(val: AddItemArgs) -> Self {
        CreateItem {
            description: val.description,
            start_datetime: val.start,
            end_datetime: val.end,
            cost: val.cost,
            priority: val.priority,
            address: val.address,
            latitude: val.lat,
            longitude: val.lng,
            altitude: val.altitude,
            notes: val.notes,
            tags: val.tags,
            order_index: val.order,
            details: val.details,
            ..CreateItem::new(val.plan_id, val.item_type, val.name)
        }
    }
}

/// List a plan's items one page at a time
#[derive(ClapArgs)]
pub struct ListItemsArgs {
    pub plan_id: String,
    #[arg(long = "type")]
    pub item_type: Option<ItemType>,
    /// Only items starting on this day
    #[arg(long)]
    pub date: Option<Date>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl From<&ListItemsArgs> for ItemQuery {
    fn from(val: &ListItemsArgs) -> Self {
        ItemQuery {
            item_type: val.item_type,
            date: val.date,
            page: val.page,
            page_size: val.page_size,
        }
    }
}

/// Change item fields and optionally replace its detail record
#[derive(ClapArgs)]
pub struct UpdateItemArgs {
    pub id: String,
    #[command(flatten)]
    pub set: SetArgs,
    /// Replacement detail record as JSON
    #[arg(long, value_parser = parse_details)]
    pub details: Option<ItemDetails>,
}

impl From<UpdateItemArgs> for UpdateItem {
    fn from(val: UpdateItemArgs) -> Self {
        UpdateItem {
            item_id: val.id,
            patch: val.set.into(),
            details: val.details,
        }
    }
}

#[derive(Subcommand)]
pub enum ItemCommands {
    #[command(alias = "a")]
    Add(AddItemArgs),
    #[command(aliases = ["l", "ls"])]
    List(ListItemsArgs),
    #[command(alias = "s")]
    Show(IdArg),
    #[command(alias = "u")]
    Update(UpdateItemArgs),
    #[command(aliases = ["d", "rm"])]
    Delete(IdArg),
}

// ============================================================================
// Relations
// ============================================================================

/// Link two items of the same plan
#[derive(ClapArgs)]
pub struct LinkArgs {
    pub source_item_id: String,
    pub target_item_id: String,
    /// Free-form relation name, e.g. leads_to or near
    pub relation_type: String,
    /// Extra attributes as a JSON object
    #[arg(long, value_parser = parse_object)]
    pub properties: Option<Map<String, Value>>,
}

impl From<LinkArgs> for UpsertRelation {
    fn from(val: LinkArgs) -> Self {
        UpsertRelation {
            source_item_id: val.source_item_id,
            target_item_id: val.target_item_id,
            relation_type: val.relation_type,
            properties: val.properties,
        }
    }
}

#[derive(Subcommand)]
pub enum RelationCommands {
    /// Create a link, or update the properties of an existing one
    Link(LinkArgs),
    /// Links touching an item
    #[command(aliases = ["l", "ls"])]
    List(IdArg),
    /// Remove a link
    Unlink(IdArg),
}

// ============================================================================
// Notes
// ============================================================================

/// Leave a note on an item
#[derive(ClapArgs)]
pub struct AddNoteArgs {
    pub item_id: String,
    pub content: String,
    /// Kind of note, e.g. tip or warning
    #[arg(long)]
    pub kind: Option<String>,
    /// 1 to 5
    #[arg(long)]
    pub rating: Option<u8>,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,
}

impl From<AddNoteArgs> for CreateAnnotation {
    fn from(val: AddNoteArgs) -> Self {
        CreateAnnotation {
            item_id: val.item_id,
            annotation_type: val.kind,
            content: val.content,
            marker_lat: val.lat,
            marker_lng: val.lng,
            rating: val.rating,
        }
    }
}

#[derive(Subcommand)]
pub enum NoteCommands {
    #[command(alias = "a")]
    Add(AddNoteArgs),
    /// Notes on an item, newest first
    #[command(aliases = ["l", "ls"])]
    List(IdArg),
    /// Edit a note you wrote
    #[command(alias = "u")]
    Update {
        id: String,
        #[command(flatten)]
        set: SetArgs,
    },
    /// Delete a note you wrote
    #[command(aliases = ["d", "rm"])]
    Delete(IdArg),
}

// ============================================================================
// Budget
// ============================================================================

/// Add a budget line to a plan
#[derive(ClapArgs)]
pub struct AddBudgetArgs {
    pub plan_id: String,
    pub category: String,
    pub description: String,
    /// Travel item this line pays for
    #[arg(long)]
    pub item: Option<String>,
    #[arg(long)]
    pub estimated: Option<f64>,
    #[arg(long)]
    pub actual: Option<f64>,
    /// Defaults to CNY
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub method: Option<String>,
    /// Defaults to pending
    #[arg(long)]
    pub status: Option<String>,
    /// When it was paid, as an RFC 3339 instant
    #[arg(long)]
    pub paid_at: Option<Timestamp>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<AddBudgetArgs> for CreateBudgetItem {
    fn from(val: AddBudgetArgs) -> Self {
        CreateBudgetItem {
            plan_id: val.plan_id,
            item_id: val.item,
            category: val.category,
            description: val.description,
            estimated_amount: val.estimated,
            actual_amount: val.actual,
            currency: val.currency,
            payment_method: val.method,
            payment_status: val.status,
            payment_date: val.paid_at,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    #[command(alias = "a")]
    Add(AddBudgetArgs),
    #[command(aliases = ["l", "ls"])]
    List(IdArg),
    #[command(alias = "u")]
    Update {
        id: String,
        #[command(flatten)]
        set: SetArgs,
    },
    #[command(aliases = ["d", "rm"])]
    Delete(IdArg),
    /// Ceiling against estimated and actual spend
    Summary(IdArg),
}
