use jiff::civil::{date, DateTime};
use serde_json::json;
use tempfile::TempDir;
use wayfarer_core::{
    db::PatchTarget,
    models::{
        AccommodationDetails, ItemDetails, ItemQuery, ItemType, PlanFilter, PlanStatus,
        ResourceKind, TransportDetails, Visibility,
    },
    params::{CreateAnnotation, CreateBudgetItem, CreateItem, CreatePlan, Patch, UpsertRelation},
    Database, TravelError,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db = Database::new(temp_dir.path().join("test.db")).expect("Failed to create database");
    (temp_dir, db)
}

fn raw_connection(temp_dir: &TempDir) -> rusqlite::Connection {
    rusqlite::Connection::open(temp_dir.path().join("test.db")).expect("Failed to open database")
}

fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("Failed to count rows")
}

fn patch(value: serde_json::Value) -> Patch {
    value.as_object().cloned().expect("patch must be an object")
}

fn at(day: i8, hour: i8) -> DateTime {
    date(2024, 10, day).at(hour, 0, 0, 0)
}

fn create_plan(db: &mut Database, owner: &str, name: &str) -> String {
    db.create_plan(
        owner,
        &CreatePlan {
            name: name.to_string(),
            budget: Some(5000.0),
            tags: vec!["autumn".to_string()],
            ..Default::default()
        },
    )
    .expect("Failed to create plan")
    .id
}

fn hotel(plan_id: &str) -> CreateItem {
    CreateItem {
        start_datetime: Some(at(1, 14)),
        cost: Some(100.0),
        details: Some(ItemDetails::Accommodation(AccommodationDetails {
            hotel_name: Some("Riwa Guesthouse".to_string()),
            total_nights: Some(1),
            ..Default::default()
        })),
        ..CreateItem::new(plan_id, ItemType::Accommodation, "Hotel")
    }
}

fn bus(plan_id: &str) -> CreateItem {
    CreateItem {
        start_datetime: Some(at(1, 8)),
        end_datetime: Some(at(1, 12)),
        cost: Some(50.0),
        ..CreateItem::new(plan_id, ItemType::Transport, "Bus")
    }
}

#[test]
fn test_create_plan_defaults() {
    let (_temp_dir, mut db) = create_test_db();

    let plan = db
        .create_plan(
            "alice",
            &CreatePlan {
                name: "Minimal".to_string(),
                ..Default::default()
            },
        )
        .expect("Failed to create plan");

    assert_eq!(plan.user_id, "alice");
    assert_eq!(plan.destination, "Daocheng Yading");
    assert_eq!(plan.status, PlanStatus::Draft);
    assert_eq!(plan.visibility, Visibility::Private);
    assert_eq!(plan.participants, 1);
    assert_eq!(plan.budget, 0.0);

    let stored = db.get_plan(&plan.id).unwrap().expect("Plan should exist");
    assert_eq!(stored, plan);
}

#[test]
fn test_list_plans_newest_first_with_status_filter() {
    let (_temp_dir, mut db) = create_test_db();
    let first = create_plan(&mut db, "alice", "First");
    let second = create_plan(&mut db, "alice", "Second");
    create_plan(&mut db, "bob", "Not mine");

    db.apply_patch(PatchTarget::Plan, &first, &patch(json!({"status": "Active"})))
        .unwrap();

    let all = db.list_plans("alice", &PlanFilter::default()).unwrap();
    let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, [second.as_str(), first.as_str()]);

    let active = db
        .list_plans(
            "alice",
            &PlanFilter {
                status: Some(PlanStatus::Active),
            },
        )
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, first);
}

#[test]
fn test_delete_plan_cascades_to_everything() {
    let (temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Doomed");
    let hotel = db.create_item("alice", &hotel(&plan_id)).unwrap();
    let bus = db.create_item("alice", &bus(&plan_id)).unwrap();
    db.upsert_relation(&UpsertRelation {
        source_item_id: bus.id.clone(),
        target_item_id: hotel.id.clone(),
        relation_type: "leads_to".to_string(),
        properties: None,
    })
    .unwrap();
    db.create_annotation(
        "bob",
        &CreateAnnotation {
            item_id: hotel.id.clone(),
            content: "Cosy".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    db.create_budget_item(&CreateBudgetItem {
        plan_id: plan_id.clone(),
        item_id: Some(hotel.id.clone()),
        category: "lodging".to_string(),
        description: "One night".to_string(),
        estimated_amount: Some(100.0),
        ..Default::default()
    })
    .unwrap();

    assert!(db.delete_plan(&plan_id).unwrap());

    let conn = raw_connection(&temp_dir);
    for table in [
        "plans",
        "travel_items",
        "accommodation_details",
        "item_relations",
        "item_annotations",
        "budget_items",
    ] {
        assert_eq!(count(&conn, table), 0, "{table} should be empty");
    }
    assert!(!db.delete_plan(&plan_id).unwrap());
}

#[test]
fn test_delete_item_keeps_budget_line_without_link() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let hotel = db.create_item("alice", &hotel(&plan_id)).unwrap();
    let line = db
        .create_budget_item(&CreateBudgetItem {
            plan_id: plan_id.clone(),
            item_id: Some(hotel.id.clone()),
            category: "lodging".to_string(),
            description: "Deposit".to_string(),
            actual_amount: Some(40.0),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(line.currency, "CNY");
    assert_eq!(line.payment_status, "pending");

    assert!(db.delete_item(&hotel.id).unwrap());

    let kept = db
        .get_budget_item(&line.id)
        .unwrap()
        .expect("budget line should survive");
    assert_eq!(kept.item_id, None);
    assert_eq!(kept.actual_amount, Some(40.0));
}

#[test]
fn test_budget_link_must_stay_inside_plan() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_a = create_plan(&mut db, "alice", "A");
    let plan_b = create_plan(&mut db, "alice", "B");
    let item = db.create_item("alice", &bus(&plan_b)).unwrap();

    let result = db.create_budget_item(&CreateBudgetItem {
        plan_id: plan_a,
        item_id: Some(item.id),
        category: "transport".to_string(),
        description: "Wrong plan".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(TravelError::Validation { field, .. }) if field == "item_id"));
}

#[test]
fn test_mismatched_details_roll_back_item() {
    let (temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");

    let params = CreateItem {
        details: Some(ItemDetails::Transport(TransportDetails::default())),
        ..CreateItem::new(plan_id.as_str(), ItemType::Accommodation, "Confused")
    };
    let result = db.create_item("alice", &params);
    assert!(matches!(result, Err(TravelError::Validation { .. })));

    let conn = raw_connection(&temp_dir);
    assert_eq!(count(&conn, "travel_items"), 0);
    assert_eq!(count(&conn, "transport_details"), 0);
}

#[test]
fn test_item_details_round_trip_and_replace() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let item = db.create_item("alice", &hotel(&plan_id)).unwrap();
    assert_eq!(item.priority, 3);
    assert_eq!(item.status, "planned");
    assert_eq!(item.created_by.as_deref(), Some("alice"));

    let loaded = db.get_item(&item.id).unwrap().expect("Item should exist");
    match &loaded.details {
        Some(ItemDetails::Accommodation(d)) => {
            assert_eq!(d.hotel_name.as_deref(), Some("Riwa Guesthouse"))
        }
        other => panic!("Expected accommodation details, got {other:?}"),
    }

    let replacement = ItemDetails::Accommodation(AccommodationDetails {
        hotel_name: Some("Yading Village Inn".to_string()),
        breakfast_included: true,
        ..Default::default()
    });
    db.update_item(&item.id, &patch(json!({"cost": 180.0})), Some(&replacement))
        .unwrap();

    let details = db.get_item_details(&item.id).unwrap();
    assert_eq!(details, Some(replacement));
    let updated = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(updated.cost, Some(180.0));
}

#[test]
fn test_update_item_rejects_wrong_details_atomically() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let item = db.create_item("alice", &bus(&plan_id)).unwrap();

    let result = db.update_item(
        &item.id,
        &patch(json!({"name": "Renamed"})),
        Some(&ItemDetails::Accommodation(AccommodationDetails::default())),
    );
    assert!(matches!(result, Err(TravelError::Validation { .. })));

    let unchanged = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Bus");
}

#[test]
fn test_patch_leaves_protected_columns_untouched() {
    let (temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let other_plan = create_plan(&mut db, "alice", "Other");
    let item = db.create_item("alice", &bus(&plan_id)).unwrap();

    let conn = raw_connection(&temp_dir);
    let protected = |conn: &rusqlite::Connection| -> (String, String, String, Option<String>, String) {
        conn.query_row(
            "SELECT id, plan_id, item_type, created_by, created_at FROM travel_items",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .unwrap()
    };
    let before = protected(&conn);

    let changed = db
        .apply_patch(
            PatchTarget::TravelItem,
            &item.id,
            &patch(json!({
                "name": "Night bus",
                "item_type": "accommodation",
                "plan_id": other_plan,
                "created_by": "mallory",
                "created_at": "1999-01-01",
                "id": "hijacked",
                "no_such_field": 1
            })),
        )
        .unwrap();
    assert_eq!(changed, 1);

    assert_eq!(protected(&conn), before);
    let updated = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(updated.name, "Night bus");
}

#[test]
fn test_patch_with_wrong_shape_changes_nothing() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let item = db.create_item("alice", &bus(&plan_id)).unwrap();

    for bad in [
        json!({"name": "Fine", "priority": 9}),
        json!({"name": "Fine", "cost": "cheap"}),
        json!({"name": "Fine", "start_datetime": "tomorrow"}),
        json!({"name": ""}),
    ] {
        let result = db.apply_patch(PatchTarget::TravelItem, &item.id, &patch(bad));
        assert!(matches!(result, Err(TravelError::Validation { .. })));
    }

    let unchanged = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Bus");
    assert_eq!(unchanged.priority, 3);
}

#[test]
fn test_patch_cannot_end_an_item_before_it_starts() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let item = db.create_item("alice", &bus(&plan_id)).unwrap();

    let moved_end = db.apply_patch(
        PatchTarget::TravelItem,
        &item.id,
        &patch(json!({"name": "Early bus", "end_datetime": "2024-10-01T06:00:00"})),
    );
    assert!(matches!(moved_end, Err(TravelError::Validation { ref field, .. }) if field == "end_datetime"));

    let moved_start = db.update_item(
        &item.id,
        &patch(json!({"start_datetime": "2024-10-02T08:00:00"})),
        None,
    );
    assert!(matches!(moved_start, Err(TravelError::Validation { .. })));

    let unchanged = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Bus");
    assert_eq!(unchanged.start_datetime, Some(at(1, 8)));
    assert_eq!(unchanged.end_datetime, Some(at(1, 12)));

    db.update_item(
        &item.id,
        &patch(json!({"start_datetime": "2024-10-02T08:00:00", "end_datetime": "2024-10-02T12:00:00"})),
        None,
    )
    .expect("moving both bounds together keeps them ordered");
    let moved = db.get_item(&item.id).unwrap().unwrap();
    assert_eq!(moved.start_datetime, Some(at(2, 8)));
}

#[test]
fn test_patch_cannot_end_a_plan_before_it_starts() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    db.apply_patch(
        PatchTarget::Plan,
        &plan_id,
        &patch(json!({"start_date": "2024-10-05"})),
    )
    .unwrap();

    let result = db.apply_patch(
        PatchTarget::Plan,
        &plan_id,
        &patch(json!({"end_date": "2024-10-01", "status": "active"})),
    );
    assert!(matches!(result, Err(TravelError::Validation { ref field, .. }) if field == "end_date"));

    let plan = db.get_plan(&plan_id).unwrap().unwrap();
    assert_eq!(plan.start_date, Some(date(2024, 10, 5)));
    assert_eq!(plan.end_date, None);
    assert_eq!(plan.status, PlanStatus::Draft);

    db.apply_patch(
        PatchTarget::Plan,
        &plan_id,
        &patch(json!({"end_date": "2024-10-05"})),
    )
    .expect("a single-day plan is allowed");
}

#[test]
fn test_empty_patch_refreshes_updated_at() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let before = db.get_plan(&plan_id).unwrap().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let changed = db
        .apply_patch(PatchTarget::Plan, &plan_id, &patch(json!({"owner": "bob"})))
        .unwrap();
    assert_eq!(changed, 1);

    let after = db.get_plan(&plan_id).unwrap().unwrap();
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.name, before.name);
}

#[test]
fn test_upsert_relation_is_idempotent_on_triple() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let bus = db.create_item("alice", &bus(&plan_id)).unwrap();
    let hotel = db.create_item("alice", &hotel(&plan_id)).unwrap();

    let mut params = UpsertRelation {
        source_item_id: bus.id.clone(),
        target_item_id: hotel.id.clone(),
        relation_type: "leads_to".to_string(),
        properties: None,
    };
    let first = db.upsert_relation(&params).unwrap();

    params.properties = json!({"walk_minutes": 10}).as_object().cloned();
    let second = db.upsert_relation(&params).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.properties, params.properties);

    let from_hotel = db.list_relations(&hotel.id).unwrap();
    assert_eq!(from_hotel.len(), 1);
    assert_eq!(from_hotel[0].other_end(&hotel.id), Some(bus.id.as_str()));

    params.relation_type = "near".to_string();
    db.upsert_relation(&params).unwrap();
    assert_eq!(db.list_relations(&bus.id).unwrap().len(), 2);

    assert!(db.delete_relation(&first.id).unwrap());
    assert!(!db.delete_relation(&first.id).unwrap());
    assert!(db.get_relation(&first.id).unwrap().is_none());
}

#[test]
fn test_relation_endpoints_must_share_a_plan() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_a = create_plan(&mut db, "alice", "A");
    let plan_b = create_plan(&mut db, "alice", "B");
    let a = db.create_item("alice", &bus(&plan_a)).unwrap();
    let b = db.create_item("alice", &bus(&plan_b)).unwrap();

    let across = db.upsert_relation(&UpsertRelation {
        source_item_id: a.id.clone(),
        target_item_id: b.id.clone(),
        relation_type: "near".to_string(),
        properties: None,
    });
    assert!(matches!(across, Err(TravelError::Validation { .. })));

    let dangling = db.upsert_relation(&UpsertRelation {
        source_item_id: a.id,
        target_item_id: "missing".to_string(),
        relation_type: "near".to_string(),
        properties: None,
    });
    assert!(matches!(
        dangling,
        Err(TravelError::NotFound {
            kind: ResourceKind::TravelItem,
            ..
        })
    ));
}

#[test]
fn test_list_items_order_filters_and_pages() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");

    let mut add = |name: &str, start: Option<DateTime>, order: Option<i64>| {
        let params = CreateItem {
            start_datetime: start,
            order_index: order,
            ..CreateItem::new(plan_id.as_str(), ItemType::Attraction, name)
        };
        db.create_item("alice", &params).unwrap();
    };
    add("A", Some(at(2, 9)), None);
    add("B", Some(at(1, 8)), None);
    add("C", None, Some(1));
    add("D", None, None);
    add("E", Some(at(1, 8)), Some(0));

    let names = |page: &wayfarer_core::models::ItemPage| -> Vec<String> {
        page.items.iter().map(|i| i.name.clone()).collect()
    };

    let all = db.list_items(&plan_id, &ItemQuery::default()).unwrap();
    assert_eq!(names(&all), ["E", "B", "A", "C", "D"]);
    assert_eq!(all.total, 5);
    assert!(!all.has_more);

    let first = db
        .list_items(
            &plan_id,
            &ItemQuery {
                page: Some(1),
                page_size: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(names(&first), ["E", "B"]);
    assert!(first.has_more);

    let last = db
        .list_items(
            &plan_id,
            &ItemQuery {
                page: Some(3),
                page_size: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(names(&last), ["D"]);
    assert!(!last.has_more);
    assert_eq!(last.total, 5);

    let day_one = db
        .list_items(
            &plan_id,
            &ItemQuery {
                date: Some(date(2024, 10, 1)),
                page_size: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(day_one.total, 2);
    assert_eq!(names(&day_one), ["E"]);
    assert!(day_one.has_more);

    let hotels = db
        .list_items(
            &plan_id,
            &ItemQuery {
                item_type: Some(ItemType::Accommodation),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(hotels.total, 0);
    assert!(hotels.items.is_empty());
}

#[test]
fn test_annotations_newest_first() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let item = db.create_item("alice", &bus(&plan_id)).unwrap();

    for content in ["first", "second", "third"] {
        db.create_annotation(
            "bob",
            &CreateAnnotation {
                item_id: item.id.clone(),
                content: content.to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    let notes = db.list_annotations(&item.id).unwrap();
    let contents: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, ["third", "second", "first"]);

    let missing = db.create_annotation(
        "bob",
        &CreateAnnotation {
            item_id: "missing".to_string(),
            content: "lost".to_string(),
            ..Default::default()
        },
    );
    assert!(matches!(missing, Err(TravelError::NotFound { .. })));
}

#[test]
fn test_duplicate_plan_copies_items_and_details() {
    let (_temp_dir, mut db) = create_test_db();
    let source = create_plan(&mut db, "alice", "Original");
    let hotel = db.create_item("alice", &hotel(&source)).unwrap();
    db.apply_patch(
        PatchTarget::TravelItem,
        &hotel.id,
        &patch(json!({"status": "booked"})),
    )
    .unwrap();
    db.create_item("alice", &bus(&source)).unwrap();

    let outcome = db.duplicate_plan(&source, "bob").unwrap();
    assert!(!outcome.is_partial());
    assert_eq!(outcome.copied_items, 2);
    assert_eq!(outcome.plan.name, "Original (copy)");
    assert_eq!(outcome.plan.user_id, "bob");
    assert_eq!(outcome.plan.budget, 5000.0);
    assert_eq!(outcome.plan.tags, ["autumn"]);
    assert_eq!(outcome.plan.status, PlanStatus::Draft);

    let copies = db.list_all_items(&outcome.plan.id).unwrap();
    assert_eq!(copies.len(), 2);
    for copy in &copies {
        assert_eq!(copy.status, "planned");
        assert_eq!(copy.created_by.as_deref(), Some("bob"));
        assert_ne!(copy.id, hotel.id);
    }
    let hotel_copy = copies
        .iter()
        .find(|c| c.item_type == ItemType::Accommodation)
        .expect("hotel copy");
    assert!(matches!(
        db.get_item_details(&hotel_copy.id).unwrap(),
        Some(ItemDetails::Accommodation(_))
    ));
}

#[test]
fn test_duplicate_plan_reports_partial_when_items_fail() {
    let (temp_dir, mut db) = create_test_db();
    let source = create_plan(&mut db, "alice", "Original");
    db.create_item("alice", &bus(&source)).unwrap();
    db.create_item("alice", &hotel(&source)).unwrap();

    let conn = raw_connection(&temp_dir);
    conn.execute_batch(
        "CREATE TRIGGER block_items BEFORE INSERT ON travel_items \
         BEGIN SELECT RAISE(ABORT, 'copy blocked'); END;",
    )
    .unwrap();

    let outcome = db.duplicate_plan(&source, "alice").unwrap();
    assert!(outcome.is_partial());
    assert_eq!(outcome.copied_items, 0);

    let copy = db
        .get_plan(&outcome.plan.id)
        .unwrap()
        .expect("plan copy should be committed");
    assert_eq!(copy.name, "Original (copy)");
    assert!(db.list_all_items(&copy.id).unwrap().is_empty());
    assert_eq!(count(&conn, "travel_items"), 2);
}

#[test]
fn test_ownership_resolution() {
    let (_temp_dir, mut db) = create_test_db();
    let plan_id = create_plan(&mut db, "alice", "Trip");
    let bus = db.create_item("alice", &bus(&plan_id)).unwrap();
    let hotel = db.create_item("alice", &hotel(&plan_id)).unwrap();
    let relation = db
        .upsert_relation(&UpsertRelation {
            source_item_id: bus.id.clone(),
            target_item_id: hotel.id.clone(),
            relation_type: "leads_to".to_string(),
            properties: None,
        })
        .unwrap();
    let note = db
        .create_annotation(
            "bob",
            &CreateAnnotation {
                item_id: bus.id.clone(),
                content: "Bring snacks".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    assert!(db.authorize("alice", &plan_id, ResourceKind::Plan).unwrap());
    assert!(db.authorize("alice", &bus.id, ResourceKind::TravelItem).unwrap());
    assert!(db.authorize("alice", &relation.id, ResourceKind::Relation).unwrap());
    assert!(!db.authorize("alice", &note.id, ResourceKind::Annotation).unwrap());
    assert!(db.authorize("bob", &note.id, ResourceKind::Annotation).unwrap());
    assert!(!db.authorize("alice", "missing", ResourceKind::Plan).unwrap());

    assert!(matches!(
        db.require_owner("bob", &bus.id, ResourceKind::TravelItem),
        Err(TravelError::Unauthorized { .. })
    ));
    assert!(matches!(
        db.require_owner("bob", "missing", ResourceKind::TravelItem),
        Err(TravelError::NotFound { .. })
    ));
}
