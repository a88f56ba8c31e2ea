#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};
    use serde_json::Map;

    use crate::models::{
        AccommodationDetails, BudgetItem, BudgetSummary, DailyItinerary, DuplicateOutcome,
        DuplicateStatus, ItemAnnotation, ItemDetails, ItemType, Plan, PlanStatus, PlanSummary,
        TransportDetails, TravelItem, TypeTotals, Visibility,
    };

    fn create_test_plan() -> Plan {
        Plan {
            id: "plan-1".to_string(),
            user_id: "alice".to_string(),
            name: "Autumn in Daocheng".to_string(),
            description: "Three days around the holy mountains".to_string(),
            destination: "Daocheng Yading".to_string(),
            start_date: Some(date(2024, 10, 1)),
            end_date: Some(date(2024, 10, 3)),
            budget: 5000.0,
            participants: 2,
            status: PlanStatus::Active,
            visibility: Visibility::Public,
            tags: vec!["autumn".to_string(), "hiking".to_string()],
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_item(item_type: ItemType) -> TravelItem {
        TravelItem {
            id: "item-1".to_string(),
            plan_id: "plan-1".to_string(),
            item_type,
            name: "Riwa Guesthouse".to_string(),
            description: Some("Wooden rooms near the gate".to_string()),
            latitude: Some(28.44),
            longitude: Some(100.35),
            altitude: Some(3900),
            address: Some("Riwa town".to_string()),
            start_datetime: Some(date(2024, 10, 1).at(14, 0, 0, 0)),
            end_datetime: Some(date(2024, 10, 2).at(12, 0, 0, 0)),
            duration_hours: None,
            cost: Some(320.0),
            priority: 4,
            status: "booked".to_string(),
            booking_status: Some("confirmed".to_string()),
            properties: Map::new(),
            images: vec![],
            notes: Some("Ask for a room with heating".to_string()),
            tags: vec![],
            order_index: None,
            group_id: None,
            created_by: Some("alice".to_string()),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            details: None,
        }
    }

    #[test]
    fn test_enum_display_matches_stored_text() {
        assert_eq!(PlanStatus::Archived.to_string(), "archived");
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(ItemType::PhotoSpot.to_string(), "photo_spot");
        for item_type in ItemType::ALL {
            assert_eq!(item_type.to_string().parse::<ItemType>(), Ok(item_type));
        }
    }

    #[test]
    fn test_plan_display() {
        let output = create_test_plan().to_string();

        assert!(output.starts_with("# Autumn in Daocheng\n"));
        assert!(output.contains("- ID: plan-1"));
        assert!(output.contains("- Dates: 2024-10-01 to 2024-10-03"));
        assert!(output.contains("- Budget: 5000.00"));
        assert!(output.contains("- Status: active (public)"));
        assert!(output.contains("- Tags: autumn, hiking"));
        assert!(output.contains("- Created: 2022-01-01") || output.contains("- Created: 2021-12-31"));
        assert!(output.contains("Three days around the holy mountains"));
    }

    #[test]
    fn test_plan_display_minimal() {
        let mut plan = create_test_plan();
        plan.start_date = None;
        plan.end_date = None;
        plan.tags.clear();
        plan.description.clear();
        let output = plan.to_string();

        assert!(!output.contains("- Dates:"));
        assert!(!output.contains("- Tags:"));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_item_display_with_details() {
        let mut item = create_test_item(ItemType::Accommodation);
        item.details = Some(ItemDetails::Accommodation(AccommodationDetails {
            hotel_name: Some("Riwa Guesthouse".to_string()),
            total_nights: Some(1),
            breakfast_included: true,
            ..Default::default()
        }));
        let output = item.to_string();

        assert!(output.contains("### Riwa Guesthouse (accommodation)"));
        assert!(output.contains("- When: 2024-10-01 14:00 to 2024-10-02 12:00"));
        assert!(output.contains("- Position: 28.44000, 100.35000 at 3900 m"));
        assert!(output.contains("- Cost: 320.00"));
        assert!(output.contains("- Status: booked (booking confirmed)"));
        assert!(output.contains("> Ask for a room with heating"));
        assert!(output.contains("#### Accommodation"));
        assert!(output.contains("- Nights: 1"));
        assert!(output.contains("- Breakfast included"));
    }

    #[test]
    fn test_transport_details_display() {
        let details = ItemDetails::Transport(TransportDetails {
            departure_location: Some("Chengdu".to_string()),
            arrival_location: Some("Daocheng".to_string()),
            carrier_name: Some("Sichuan Airlines".to_string()),
            ..Default::default()
        });
        let output = details.to_string();

        assert!(output.contains("#### Transport"));
        assert!(output.contains("- Route: Chengdu to Daocheng"));
        assert!(output.contains("- Carrier: Sichuan Airlines"));
        assert!(!output.contains("- Distance:"));
    }

    #[test]
    fn test_annotation_display() {
        let annotation = ItemAnnotation {
            id: "a1".to_string(),
            item_id: "item-1".to_string(),
            annotation_type: None,
            content: "Great sunrise view".to_string(),
            marker_lat: None,
            marker_lng: None,
            rating: Some(5),
            created_by: "bob".to_string(),
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        };
        let output = annotation.to_string();

        assert!(output.starts_with("- [note] Great sunrise view (5/5) by bob at "));
        assert!(output.ends_with("(ID: a1)\n"));
    }

    #[test]
    fn test_budget_item_display_missing_amounts() {
        let line = BudgetItem {
            id: "b1".to_string(),
            plan_id: "plan-1".to_string(),
            item_id: None,
            category: "food".to_string(),
            description: "Yak hotpot".to_string(),
            estimated_amount: Some(150.0),
            actual_amount: None,
            currency: "CNY".to_string(),
            payment_method: None,
            payment_status: "pending".to_string(),
            payment_date: None,
            notes: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        };
        assert_eq!(
            line.to_string(),
            "- **food** Yak hotpot: estimated 150.00, actual - CNY [pending] (ID: b1)\n"
        );
    }

    #[test]
    fn test_daily_itinerary_display() {
        let item = create_test_item(ItemType::Accommodation);
        let day = DailyItinerary {
            date: date(2024, 10, 1),
            items: vec![item],
            total_cost: 320.0,
            start_time: Some(date(2024, 10, 1).at(14, 0, 0, 0)),
            end_time: Some(date(2024, 10, 2).at(12, 0, 0, 0)),
        };
        let output = day.to_string();

        assert!(output.starts_with("## 2024-10-01\n"));
        assert!(output.contains("- From 14:00 to 12:00"));
        assert!(output.contains("- Cost: 320.00"));
        assert!(output.contains("- 14:00 Riwa Guesthouse (accommodation)"));
    }

    #[test]
    fn test_plan_summary_display_has_type_table() {
        let summary = PlanSummary {
            plan_id: "plan-1".to_string(),
            total_items: 2,
            total_cost: 150.0,
            by_type: vec![TypeTotals {
                item_type: ItemType::Transport,
                count: 2,
                cost: 150.0,
            }],
            ..Default::default()
        };
        let output = summary.to_string();

        assert!(output.contains("## Summary of plan plan-1"));
        assert!(output.contains("- Items: 2"));
        assert!(!output.contains("- Span:"));
        assert!(output.contains("| transport | 2 | 150.00 |"));
    }

    #[test]
    fn test_budget_summary_display() {
        let summary = BudgetSummary {
            plan_id: "plan-1".to_string(),
            total_budget: 5000.0,
            total_estimated: 1200.0,
            total_actual: 300.5,
            remaining: 4699.5,
            line_count: 3,
        };
        let output = summary.to_string();

        assert!(output.contains("- Ceiling: 5000.00"));
        assert!(output.contains("- Remaining: 4699.50"));
        assert!(output.contains("- Lines: 3"));
    }

    #[test]
    fn test_duplicate_outcome_display() {
        let mut outcome = DuplicateOutcome {
            plan: create_test_plan(),
            copied_items: 4,
            status: DuplicateStatus::Complete,
        };
        assert!(outcome
            .to_string()
            .starts_with("Duplicated plan as ID: plan-1 with 4 items\n"));

        outcome.copied_items = 0;
        outcome.status = DuplicateStatus::Partial {
            reason: "copy blocked".to_string(),
        };
        assert!(outcome.is_partial());
        assert!(outcome
            .to_string()
            .contains("but items were not copied: copy blocked"));
    }
}
