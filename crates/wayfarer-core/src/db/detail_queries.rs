//! Type-specific detail records.
//!
//! Each [`DetailFamily`] has its own table keyed by item id. Writes are
//! routed here by the item queries and always run on the caller's
//! transaction, so a failed detail write takes the item write down with it.

use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{
    get_optional_unsigned, parse_optional_column, parse_optional_json, to_optional_json,
};
use crate::{
    error::{DatabaseResultExt, Result, TravelError},
    models::{
        AccommodationDetails, AttractionDetails, DetailFamily, ItemDetails, ItemType,
        ResourceKind, TransportDetails,
    },
};

const INSERT_ACCOMMODATION_SQL: &str = "INSERT INTO accommodation_details (item_id, hotel_name, \
     room_type, check_in_time, check_out_time, guests_count, breakfast_included, booking_platform, \
     booking_number, booking_url, phone, email, rating, amenities, price_per_night, total_nights, \
     taxes_fees, cancellation_policy) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";
const SELECT_ACCOMMODATION_SQL: &str = "SELECT hotel_name, room_type, check_in_time, \
     check_out_time, guests_count, breakfast_included, booking_platform, booking_number, \
     booking_url, phone, email, rating, amenities, price_per_night, total_nights, taxes_fees, \
     cancellation_policy FROM accommodation_details WHERE item_id = ?1";

const INSERT_TRANSPORT_SQL: &str = "INSERT INTO transport_details (item_id, transport_type, \
     departure_location, arrival_location, departure_time, arrival_time, distance_km, \
     booking_reference, carrier_name, vehicle_number, seat_number, route_polyline, \
     estimated_fuel_cost, toll_cost, departure_terminal, arrival_terminal) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)";
const SELECT_TRANSPORT_SQL: &str = "SELECT transport_type, departure_location, arrival_location, \
     departure_time, arrival_time, distance_km, booking_reference, carrier_name, vehicle_number, \
     seat_number, route_polyline, estimated_fuel_cost, toll_cost, departure_terminal, \
     arrival_terminal FROM transport_details WHERE item_id = ?1";

const INSERT_ATTRACTION_SQL: &str = "INSERT INTO attraction_details (item_id, attraction_type, \
     ticket_price, ticket_type, advance_booking_required, best_visit_time, recommended_duration, \
     difficulty_level, photography_tips, sunrise_time, sunset_time, accessibility_info) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_ATTRACTION_SQL: &str = "SELECT attraction_type, ticket_price, ticket_type, \
     advance_booking_required, best_visit_time, recommended_duration, difficulty_level, \
     photography_tips, sunrise_time, sunset_time, accessibility_info \
     FROM attraction_details WHERE item_id = ?1";

const SELECT_ITEM_TYPE_SQL: &str = "SELECT item_type FROM travel_items WHERE id = ?1";

impl DetailFamily {
    fn table(&self) -> &'static str {
        match self {
            DetailFamily::Accommodation => "accommodation_details",
            DetailFamily::Transport => "transport_details",
            DetailFamily::Attraction => "attraction_details",
        }
    }
}

impl super::Database {
    /// Loads the detail record of an item, if it has one.
    pub fn get_item_details(&self, item_id: &str) -> Result<Option<ItemDetails>> {
        let item_type = item_type_of(&self.connection, item_id)?
            .ok_or_else(|| TravelError::not_found(ResourceKind::TravelItem, item_id))?;
        load_details(&self.connection, item_id, item_type)
    }
}

/// The stored type of an item, `None` when the item does not exist.
pub(crate) fn item_type_of(conn: &Connection, item_id: &str) -> Result<Option<ItemType>> {
    conn.query_row(SELECT_ITEM_TYPE_SQL, params![item_id], |row| {
        super::rows::parse_column::<ItemType>(row, 0)
    })
    .optional()
    .db_context("Failed to query item type")
}

/// Writes the detail row for a freshly inserted item.
///
/// Rejects payloads that do not belong to `item_type`'s family.
pub(crate) fn insert_details(
    conn: &Connection,
    item_id: &str,
    item_type: ItemType,
    details: &ItemDetails,
) -> Result<()> {
    if !details.accepts(item_type) {
        return Err(TravelError::validation("details").with_reason(format!(
            "{} details cannot be attached to a {} item",
            details.family().as_str(),
            item_type.as_str()
        )));
    }

    match details {
        ItemDetails::Accommodation(d) => conn
            .execute(
                INSERT_ACCOMMODATION_SQL,
                params![
                    item_id,
                    d.hotel_name,
                    d.room_type,
                    d.check_in_time.map(|t| t.to_string()),
                    d.check_out_time.map(|t| t.to_string()),
                    d.guests_count,
                    d.breakfast_included,
                    d.booking_platform,
                    d.booking_number,
                    d.booking_url,
                    d.phone,
                    d.email,
                    d.rating,
                    to_optional_json(d.amenities.as_ref())?,
                    d.price_per_night,
                    d.total_nights,
                    d.taxes_fees,
                    d.cancellation_policy,
                ],
            )
            .db_context("Failed to insert accommodation details")?,
        ItemDetails::Transport(d) => conn
            .execute(
                INSERT_TRANSPORT_SQL,
                params![
                    item_id,
                    d.transport_type,
                    d.departure_location,
                    d.arrival_location,
                    d.departure_time.map(|t| t.to_string()),
                    d.arrival_time.map(|t| t.to_string()),
                    d.distance_km,
                    d.booking_reference,
                    d.carrier_name,
                    d.vehicle_number,
                    d.seat_number,
                    d.route_polyline,
                    d.estimated_fuel_cost,
                    d.toll_cost,
                    d.departure_terminal,
                    d.arrival_terminal,
                ],
            )
            .db_context("Failed to insert transport details")?,
        ItemDetails::Attraction(d) => conn
            .execute(
                INSERT_ATTRACTION_SQL,
                params![
                    item_id,
                    d.attraction_type,
                    d.ticket_price,
                    d.ticket_type,
                    d.advance_booking_required,
                    d.best_visit_time,
                    d.recommended_duration,
                    d.difficulty_level,
                    d.photography_tips,
                    d.sunrise_time.map(|t| t.to_string()),
                    d.sunset_time.map(|t| t.to_string()),
                    d.accessibility_info,
                ],
            )
            .db_context("Failed to insert attraction details")?,
    };
    Ok(())
}

/// Replaces whatever detail row an item has with `details`.
pub(crate) fn replace_details(
    conn: &Connection,
    item_id: &str,
    item_type: ItemType,
    details: &ItemDetails,
) -> Result<()> {
    let family = details.family();
    conn.execute(
        &format!("DELETE FROM {} WHERE item_id = ?1", family.table()),
        params![item_id],
    )
    .db_context("Failed to clear previous details")?;
    insert_details(conn, item_id, item_type, details)
}

/// Loads the detail row matching `item_type`'s family.
pub(crate) fn load_details(
    conn: &Connection,
    item_id: &str,
    item_type: ItemType,
) -> Result<Option<ItemDetails>> {
    let Some(family) = DetailFamily::for_item_type(item_type) else {
        return Ok(None);
    };

    let details = match family {
        DetailFamily::Accommodation => conn
            .query_row(SELECT_ACCOMMODATION_SQL, params![item_id], |row| {
                Ok(ItemDetails::Accommodation(AccommodationDetails {
                    hotel_name: row.get(0)?,
                    room_type: row.get(1)?,
                    check_in_time: parse_optional_column(row, 2)?,
                    check_out_time: parse_optional_column(row, 3)?,
                    guests_count: get_optional_unsigned(row, 4)?,
                    breakfast_included: row.get(5)?,
                    booking_platform: row.get(6)?,
                    booking_number: row.get(7)?,
                    booking_url: row.get(8)?,
                    phone: row.get(9)?,
                    email: row.get(10)?,
                    rating: row.get(11)?,
                    amenities: parse_optional_json(row, 12)?,
                    price_per_night: row.get(13)?,
                    total_nights: get_optional_unsigned(row, 14)?,
                    taxes_fees: row.get(15)?,
                    cancellation_policy: row.get(16)?,
                }))
            })
            .optional()
            .db_context("Failed to query accommodation details")?,
        DetailFamily::Transport => conn
            .query_row(SELECT_TRANSPORT_SQL, params![item_id], |row| {
                Ok(ItemDetails::Transport(TransportDetails {
                    transport_type: row.get(0)?,
                    departure_location: row.get(1)?,
                    arrival_location: row.get(2)?,
                    departure_time: parse_optional_column(row, 3)?,
                    arrival_time: parse_optional_column(row, 4)?,
                    distance_km: row.get(5)?,
                    booking_reference: row.get(6)?,
                    carrier_name: row.get(7)?,
                    vehicle_number: row.get(8)?,
                    seat_number: row.get(9)?,
                    route_polyline: row.get(10)?,
                    estimated_fuel_cost: row.get(11)?,
                    toll_cost: row.get(12)?,
                    departure_terminal: row.get(13)?,
                    arrival_terminal: row.get(14)?,
                }))
            })
            .optional()
            .db_context("Failed to query transport details")?,
        DetailFamily::Attraction => conn
            .query_row(SELECT_ATTRACTION_SQL, params![item_id], |row| {
                Ok(ItemDetails::Attraction(AttractionDetails {
                    attraction_type: row.get(0)?,
                    ticket_price: row.get(1)?,
                    ticket_type: row.get(2)?,
                    advance_booking_required: row.get(3)?,
                    best_visit_time: row.get(4)?,
                    recommended_duration: row.get(5)?,
                    difficulty_level: get_optional_unsigned(row, 6)?,
                    photography_tips: row.get(7)?,
                    sunrise_time: parse_optional_column(row, 8)?,
                    sunset_time: parse_optional_column(row, 9)?,
                    accessibility_info: row.get(10)?,
                }))
            })
            .optional()
            .db_context("Failed to query attraction details")?,
    };

    Ok(details)
}
