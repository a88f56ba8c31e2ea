//! Relations and annotations hanging off travel items.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A directed, typed edge between two travel items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRelation {
    pub id: String,
    pub source_item_id: String,
    pub target_item_id: String,
    pub relation_type: String,
    pub properties: Option<Map<String, Value>>,
    pub created_at: Timestamp,
}

impl ItemRelation {
    /// The endpoint opposite `item_id`, if `item_id` is one of them.
    pub fn other_end(&self, item_id: &str) -> Option<&str> {
        if self.source_item_id == item_id {
            Some(&self.target_item_id)
        } else if self.target_item_id == item_id {
            Some(&self.source_item_id)
        } else {
            None
        }
    }
}

/// A note, marker or rating left on a travel item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemAnnotation {
    pub id: String,
    pub item_id: String,
    pub annotation_type: Option<String>,
    pub content: String,
    pub marker_lat: Option<f64>,
    pub marker_lng: Option<f64>,
    /// 1 to 5 inclusive
    pub rating: Option<u8>,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
