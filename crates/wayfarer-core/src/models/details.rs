//! Type-specific detail records attached to travel items.

use jiff::civil::{DateTime, Time};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ItemType;

/// Detail payload, tagged by the family it belongs to.
///
/// An item carries at most one of these, and only the variant matching its
/// [`ItemType`] (see [`ItemDetails::accepts`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetails {
    Accommodation(AccommodationDetails),
    Transport(TransportDetails),
    Attraction(AttractionDetails),
}

impl ItemDetails {
    /// Whether this payload may be attached to an item of `item_type`.
    pub fn accepts(&self, item_type: ItemType) -> bool {
        DetailFamily::for_item_type(item_type) == Some(self.family())
    }

    pub fn family(&self) -> DetailFamily {
        match self {
            ItemDetails::Accommodation(_) => DetailFamily::Accommodation,
            ItemDetails::Transport(_) => DetailFamily::Transport,
            ItemDetails::Attraction(_) => DetailFamily::Attraction,
        }
    }
}

/// Detail table an item type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFamily {
    Accommodation,
    Transport,
    Attraction,
}

impl DetailFamily {
    /// Rest areas, checkpoints and other items have no detail table.
    pub fn for_item_type(item_type: ItemType) -> Option<Self> {
        match item_type {
            ItemType::Accommodation => Some(DetailFamily::Accommodation),
            ItemType::Transport => Some(DetailFamily::Transport),
            ItemType::Attraction | ItemType::PhotoSpot => Some(DetailFamily::Attraction),
            ItemType::RestArea | ItemType::Checkpoint | ItemType::Other => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DetailFamily::Accommodation => "accommodation",
            DetailFamily::Transport => "transport",
            DetailFamily::Attraction => "attraction",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccommodationDetails {
    pub hotel_name: Option<String>,
    pub room_type: Option<String>,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub guests_count: Option<u32>,
    #[serde(default)]
    pub breakfast_included: bool,
    pub booking_platform: Option<String>,
    pub booking_number: Option<String>,
    pub booking_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// 0 to 5 inclusive
    pub rating: Option<f64>,
    pub amenities: Option<Value>,
    pub price_per_night: Option<f64>,
    pub total_nights: Option<u32>,
    pub taxes_fees: Option<f64>,
    pub cancellation_policy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransportDetails {
    pub transport_type: Option<String>,
    pub departure_location: Option<String>,
    pub arrival_location: Option<String>,
    pub departure_time: Option<DateTime>,
    pub arrival_time: Option<DateTime>,
    pub distance_km: Option<f64>,
    pub booking_reference: Option<String>,
    pub carrier_name: Option<String>,
    pub vehicle_number: Option<String>,
    pub seat_number: Option<String>,
    pub route_polyline: Option<String>,
    pub estimated_fuel_cost: Option<f64>,
    pub toll_cost: Option<f64>,
    pub departure_terminal: Option<String>,
    pub arrival_terminal: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AttractionDetails {
    pub attraction_type: Option<String>,
    pub ticket_price: Option<f64>,
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub advance_booking_required: bool,
    pub best_visit_time: Option<String>,
    pub recommended_duration: Option<f64>,
    /// 1 (easy) to 5 (strenuous)
    pub difficulty_level: Option<u8>,
    pub photography_tips: Option<String>,
    pub sunrise_time: Option<Time>,
    pub sunset_time: Option<Time>,
    pub accessibility_info: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_spot_accepts_attraction_details() {
        let details = ItemDetails::Attraction(AttractionDetails::default());
        assert!(details.accepts(ItemType::Attraction));
        assert!(details.accepts(ItemType::PhotoSpot));
        assert!(!details.accepts(ItemType::Transport));
    }

    #[test]
    fn test_items_without_detail_table_accept_nothing() {
        let details = ItemDetails::Accommodation(AccommodationDetails::default());
        for item_type in [ItemType::RestArea, ItemType::Checkpoint, ItemType::Other] {
            assert!(!details.accepts(item_type));
            assert_eq!(DetailFamily::for_item_type(item_type), None);
        }
    }

    #[test]
    fn test_details_are_tagged_by_kind() {
        let json = r#"{"kind":"transport","carrier_name":"Sichuan Airlines"}"#;
        let details: ItemDetails = serde_json::from_str(json).unwrap();
        match details {
            ItemDetails::Transport(t) => {
                assert_eq!(t.carrier_name.as_deref(), Some("Sichuan Airlines"))
            }
            other => panic!("Expected transport details, got {other:?}"),
        }
    }
}
