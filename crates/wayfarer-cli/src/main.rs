//! Wayfarer CLI Application
//!
//! Command-line interface for the wayfarer travel planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use wayfarer_core::{models::PlanFilter, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!(
        "Wayfarer started as '{user}' on {}",
        planner.database_path().display()
    );

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color), user);

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        Some(Relation { command }) => cli.handle_relation_command(command).await,
        Some(Note { command }) => cli.handle_note_command(command).await,
        Some(Budget { command }) => cli.handle_budget_command(command).await,
        None => cli.list_plans(PlanFilter::default()).await,
    }
}
