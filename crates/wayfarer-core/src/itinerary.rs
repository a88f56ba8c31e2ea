//! Derived views over a plan's items and budget lines.
//!
//! Everything here is a pure function over records already loaded from the
//! store, so the same inputs always produce the same output.

use std::collections::BTreeMap;

use jiff::civil::DateTime;

use crate::models::{
    BudgetItem, BudgetSummary, DailyItinerary, ItemType, Plan, PlanSummary, TravelItem,
    TypeTotals,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Groups scheduled items by the calendar date they start on.
///
/// Items without a start are left out. Buckets come back in ascending date
/// order and keep the input order of their items.
pub fn build_daily_itinerary(items: &[TravelItem]) -> Vec<DailyItinerary> {
    let mut days: BTreeMap<_, DailyItinerary> = BTreeMap::new();

    for item in items {
        let Some(start) = item.start_datetime else {
            continue;
        };
        let day = days.entry(start.date()).or_insert_with(|| DailyItinerary {
            date: start.date(),
            items: Vec::new(),
            total_cost: 0.0,
            start_time: None,
            end_time: None,
        });

        day.total_cost += item.effective_cost();
        day.start_time = Some(day.start_time.map_or(start, |current| current.min(start)));
        day.end_time = max_defined(day.end_time, item.end_datetime);
        day.items.push(item.clone());
    }

    days.into_values().collect()
}

/// Plan-wide counts and costs.
///
/// The date span runs from the earliest start to the latest end among items
/// that have a start. `duration_days` counts whole days in that span plus
/// one, and stays 0 unless both ends are known.
pub fn build_plan_summary(
    plan_id: &str,
    items: &[TravelItem],
    budget_items: &[BudgetItem],
) -> PlanSummary {
    let mut summary = PlanSummary {
        plan_id: plan_id.to_string(),
        ..Default::default()
    };
    let mut by_type: BTreeMap<ItemType, TypeTotals> = BTreeMap::new();

    for item in items {
        let totals = by_type.entry(item.item_type).or_insert(TypeTotals {
            item_type: item.item_type,
            count: 0,
            cost: 0.0,
        });
        totals.count += 1;
        totals.cost += item.effective_cost();

        match item.item_type {
            ItemType::Accommodation => summary.accommodation_days += 1,
            ItemType::Transport => summary.transport_count += 1,
            ItemType::Attraction | ItemType::PhotoSpot => summary.attraction_count += 1,
            ItemType::RestArea | ItemType::Checkpoint | ItemType::Other => {}
        }

        summary.total_items += 1;
        summary.total_cost += item.effective_cost();

        if let Some(start) = item.start_datetime {
            summary.start_date = Some(summary.start_date.map_or(start, |s| s.min(start)));
            summary.end_date = max_defined(summary.end_date, item.end_datetime);
        }
    }

    if let (Some(start), Some(end)) = (summary.start_date, summary.end_date) {
        summary.duration_days = span_days(start, end);
    }

    summary.estimated_cost = budget_items
        .iter()
        .filter_map(|b| b.estimated_amount)
        .sum();
    summary.by_type = by_type.into_values().collect();

    summary
}

/// Budget ceiling against what the plan's budget lines expect and record.
pub fn build_budget_summary(plan: &Plan, budget_items: &[BudgetItem]) -> BudgetSummary {
    let total_estimated: f64 = budget_items
        .iter()
        .filter_map(|b| b.estimated_amount)
        .sum();
    let total_actual: f64 = budget_items.iter().filter_map(|b| b.actual_amount).sum();

    BudgetSummary {
        plan_id: plan.id.clone(),
        total_budget: plan.budget,
        total_estimated,
        total_actual,
        remaining: plan.budget - total_actual,
        line_count: u32::try_from(budget_items.len()).unwrap_or(u32::MAX),
    }
}

fn max_defined(current: Option<DateTime>, candidate: Option<DateTime>) -> Option<DateTime> {
    match (current, candidate) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

// Whole days truncate toward zero
fn span_days(start: DateTime, end: DateTime) -> i64 {
    end.duration_since(start).as_secs() / SECONDS_PER_DAY + 1
}
