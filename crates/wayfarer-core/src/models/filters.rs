//! Filter and paging types for listing queries.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{ItemType, PlanStatus, TravelItem};

/// Page size used when the requested one is out of range.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter options for listing a caller's plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Only plans in this status
    pub status: Option<PlanStatus>,
}

/// Filter and paging options for listing a plan's items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemQuery {
    pub item_type: Option<ItemType>,
    /// Only items starting on this calendar date
    pub date: Option<Date>,
    /// 1-based page number
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ItemQuery {
    /// Page number, with anything below 1 treated as the first page.
    pub fn effective_page(&self) -> u32 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Page size, falling back to the default outside `1..=100`.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.effective_page() - 1) * u64::from(self.effective_page_size())
    }
}

/// One page of travel items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPage {
    pub items: Vec<TravelItem>,
    /// Matching items across all pages
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults() {
        let query = ItemQuery::default();
        assert_eq!(query.effective_page(), 1);
        assert_eq!(query.effective_page_size(), 50);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_out_of_range_paging_is_clamped() {
        let query = ItemQuery {
            page: Some(0),
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(query.effective_page(), 1);
        assert_eq!(query.effective_page_size(), DEFAULT_PAGE_SIZE);

        let query = ItemQuery {
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        };
        assert_eq!(query.offset(), 20);
    }
}
