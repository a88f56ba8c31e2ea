use wayfarer_core::{params::CreatePlan, Plan, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Creates a plan for `owner` with the given name and a 5000 budget.
pub async fn create_plan(planner: &Planner, owner: &str, name: &str) -> Plan {
    planner
        .create_plan(
            owner,
            &CreatePlan {
                name: name.to_string(),
                budget: Some(5000.0),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to create plan")
}
