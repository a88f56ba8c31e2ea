//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper prints its members one after another and a fixed line when
//! there are none.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::{
    BudgetItem, DailyItinerary, ItemAnnotation, ItemPage, ItemRelation, Plan, TravelItem,
};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for entry in &self.0 {
                    self.fmt_entry(entry, f)?;
                }
                Ok(())
            }
        }
    };
}

collection!(
    /// Plans shown as one short section each.
    ///
    /// ```rust
    /// use wayfarer_core::display::Plans;
    ///
    /// assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
    /// ```
    Plans,
    Plan,
    "No plans found."
);
collection!(TravelItems, TravelItem, "No items found.");
collection!(
    /// Days of a plan, earliest first.
    Itinerary,
    DailyItinerary,
    "Nothing scheduled yet."
);
collection!(Relations, ItemRelation, "No relations found.");
collection!(Annotations, ItemAnnotation, "No annotations yet.");
collection!(BudgetItems, BudgetItem, "No budget lines found.");

impl Plans {
    fn fmt_entry(&self, plan: &Plan, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", plan.name, plan.id)?;
        writeln!(f)?;
        writeln!(f, "- **Destination**: {}", plan.destination)?;
        if let (Some(start), Some(end)) = (&plan.start_date, &plan.end_date) {
            writeln!(f, "- **Dates**: {start} to {end}")?;
        }
        writeln!(f, "- **Status**: {} ({})", plan.status, plan.visibility)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&plan.created_at))?;
        writeln!(f)
    }
}

impl TravelItems {
    fn fmt_entry(&self, item: &TravelItem, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{item}")
    }
}

impl Itinerary {
    fn fmt_entry(&self, day: &DailyItinerary, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{day}")
    }
}

impl Relations {
    fn fmt_entry(&self, relation: &ItemRelation, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{relation}")
    }
}

impl Annotations {
    fn fmt_entry(&self, annotation: &ItemAnnotation, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{annotation}")
    }
}

impl BudgetItems {
    fn fmt_entry(&self, line: &BudgetItem, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{line}")
    }
}

/// One page of items with a footer saying where it sits in the whole list.
pub struct ItemPageView<'a>(pub &'a ItemPage);

impl fmt::Display for ItemPageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if page.items.is_empty() {
            writeln!(f, "No items found.")?;
        } else {
            for item in &page.items {
                write!(f, "{item}")?;
            }
        }
        write!(
            f,
            "Page {} ({} per page) of {} items",
            page.page, page.page_size, page.total
        )?;
        if page.has_more {
            write!(f, ", more on page {}", page.page + 1)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};
    use serde_json::Map;

    use super::*;
    use crate::models::{ItemType, PlanStatus, Visibility};

    fn sample_plan(id: &str, name: &str) -> Plan {
        Plan {
            id: id.to_string(),
            user_id: "alice".to_string(),
            name: name.to_string(),
            description: String::new(),
            destination: "Daocheng Yading".to_string(),
            start_date: Some(date(2024, 10, 1)),
            end_date: Some(date(2024, 10, 3)),
            budget: 5000.0,
            participants: 2,
            status: PlanStatus::Draft,
            visibility: Visibility::Private,
            tags: vec![],
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    fn sample_item(name: &str) -> TravelItem {
        TravelItem {
            id: format!("{name}-id"),
            plan_id: "p1".to_string(),
            item_type: ItemType::Attraction,
            name: name.to_string(),
            description: None,
            latitude: None,
            longitude: None,
            altitude: None,
            address: None,
            start_datetime: Some(date(2024, 10, 2).at(9, 0, 0, 0)),
            end_datetime: None,
            duration_hours: None,
            cost: None,
            priority: 3,
            status: "planned".to_string(),
            booking_status: None,
            properties: Map::new(),
            images: vec![],
            notes: None,
            tags: vec![],
            order_index: None,
            group_id: None,
            created_by: Some("alice".to_string()),
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
            details: None,
        }
    }

    #[test]
    fn test_plans_display() {
        let plans = Plans(vec![sample_plan("p1", "Yading"), sample_plan("p2", "Litang")]);
        let output = plans.to_string();
        assert!(output.contains("## Yading (ID: p1)"));
        assert!(output.contains("## Litang (ID: p2)"));
        assert!(output.contains("2024-10-01 to 2024-10-03"));
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Relations(vec![]).to_string(), "No relations found.\n");
        assert_eq!(Annotations(vec![]).to_string(), "No annotations yet.\n");
        assert_eq!(BudgetItems(vec![]).to_string(), "No budget lines found.\n");
        assert_eq!(Itinerary(vec![]).to_string(), "Nothing scheduled yet.\n");
    }

    #[test]
    fn test_item_page_footer() {
        let page = ItemPage {
            items: vec![sample_item("Milk Lake")],
            total: 3,
            page: 1,
            page_size: 1,
            has_more: true,
        };
        let output = ItemPageView(&page).to_string();
        assert!(output.contains("### Milk Lake (attraction)"));
        assert!(output.ends_with("Page 1 (1 per page) of 3 items, more on page 2\n"));
    }

    #[test]
    fn test_collection_accessors() {
        let items = TravelItems::from(vec![sample_item("a"), sample_item("b")]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "b");
        assert!(items.get(2).is_none());
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
