//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the records stay plain data. All
//! output is markdown meant for the terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, Schedule};
use crate::models::{
    AccommodationDetails, AttractionDetails, BudgetItem, BudgetSummary, DailyItinerary,
    DuplicateOutcome, DuplicateStatus, ItemAnnotation, ItemDetails, ItemRelation, ItemType, Plan,
    PlanStatus, PlanSummary, TransportDetails, TravelItem, Visibility,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Destination: {}", self.destination)?;
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => writeln!(f, "- Dates: {start} to {end}")?,
            (Some(start), None) => writeln!(f, "- Starts: {start}")?,
            (None, Some(end)) => writeln!(f, "- Ends: {end}")?,
            (None, None) => {}
        }
        writeln!(f, "- Budget: {:.2}", self.budget)?;
        writeln!(f, "- Participants: {}", self.participants)?;
        writeln!(f, "- Status: {} ({})", self.status, self.visibility)?;
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        Ok(())
    }
}

impl fmt::Display for TravelItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} ({})", self.name, self.item_type)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;

        match (&self.start_datetime, &self.end_datetime) {
            (Some(start), Some(end)) => {
                writeln!(f, "- When: {} to {}", Schedule(start), Schedule(end))?
            }
            (Some(start), None) => writeln!(f, "- When: {}", Schedule(start))?,
            _ => {}
        }
        if let Some(address) = &self.address {
            writeln!(f, "- Where: {address}")?;
        }
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            match self.altitude {
                Some(alt) => writeln!(f, "- Position: {lat:.5}, {lng:.5} at {alt} m")?,
                None => writeln!(f, "- Position: {lat:.5}, {lng:.5}")?,
            }
        }
        if let Some(cost) = self.cost {
            writeln!(f, "- Cost: {cost:.2}")?;
        }
        writeln!(f, "- Priority: {}", self.priority)?;
        match &self.booking_status {
            Some(booking) => writeln!(f, "- Status: {} (booking {booking})", self.status)?,
            None => writeln!(f, "- Status: {}", self.status)?,
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }

        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "> {notes}")?;
        }
        if let Some(details) = &self.details {
            writeln!(f)?;
            write!(f, "{details}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ItemDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemDetails::Accommodation(d) => fmt_accommodation(d, f),
            ItemDetails::Transport(d) => fmt_transport(d, f),
            ItemDetails::Attraction(d) => fmt_attraction(d, f),
        }
    }
}

fn fmt_accommodation(d: &AccommodationDetails, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "#### Accommodation")?;
    writeln!(f)?;
    if let Some(hotel) = &d.hotel_name {
        writeln!(f, "- Hotel: {hotel}")?;
    }
    if let Some(room) = &d.room_type {
        writeln!(f, "- Room: {room}")?;
    }
    if let Some(check_in) = &d.check_in_time {
        writeln!(f, "- Check-in: {}", check_in.strftime("%H:%M"))?;
    }
    if let Some(check_out) = &d.check_out_time {
        writeln!(f, "- Check-out: {}", check_out.strftime("%H:%M"))?;
    }
    if let Some(nights) = d.total_nights {
        writeln!(f, "- Nights: {nights}")?;
    }
    if let Some(price) = d.price_per_night {
        writeln!(f, "- Per night: {price:.2}")?;
    }
    if d.breakfast_included {
        writeln!(f, "- Breakfast included")?;
    }
    if let Some(number) = &d.booking_number {
        writeln!(f, "- Booking: {number}")?;
    }
    Ok(())
}

fn fmt_transport(d: &TransportDetails, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "#### Transport")?;
    writeln!(f)?;
    if let Some(kind) = &d.transport_type {
        writeln!(f, "- Mode: {kind}")?;
    }
    if let (Some(from), Some(to)) = (&d.departure_location, &d.arrival_location) {
        writeln!(f, "- Route: {from} to {to}")?;
    }
    if let Some(departure) = &d.departure_time {
        writeln!(f, "- Departs: {}", Schedule(departure))?;
    }
    if let Some(arrival) = &d.arrival_time {
        writeln!(f, "- Arrives: {}", Schedule(arrival))?;
    }
    if let Some(carrier) = &d.carrier_name {
        writeln!(f, "- Carrier: {carrier}")?;
    }
    if let Some(distance) = d.distance_km {
        writeln!(f, "- Distance: {distance:.1} km")?;
    }
    if let Some(reference) = &d.booking_reference {
        writeln!(f, "- Booking: {reference}")?;
    }
    Ok(())
}

fn fmt_attraction(d: &AttractionDetails, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "#### Attraction")?;
    writeln!(f)?;
    if let Some(kind) = &d.attraction_type {
        writeln!(f, "- Kind: {kind}")?;
    }
    if let Some(price) = d.ticket_price {
        writeln!(f, "- Ticket: {price:.2}")?;
    }
    if d.advance_booking_required {
        writeln!(f, "- Book in advance")?;
    }
    if let Some(best) = &d.best_visit_time {
        writeln!(f, "- Best time: {best}")?;
    }
    if let Some(level) = d.difficulty_level {
        writeln!(f, "- Difficulty: {level}/5")?;
    }
    if let Some(sunrise) = &d.sunrise_time {
        writeln!(f, "- Sunrise: {}", sunrise.strftime("%H:%M"))?;
    }
    if let Some(sunset) = &d.sunset_time {
        writeln!(f, "- Sunset: {}", sunset.strftime("%H:%M"))?;
    }
    if let Some(tips) = &d.photography_tips {
        writeln!(f, "- Photo tips: {tips}")?;
    }
    Ok(())
}

impl fmt::Display for ItemRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} --{}--> {} (ID: {})",
            self.source_item_id, self.relation_type, self.target_item_id, self.id
        )
    }
}

impl fmt::Display for ItemAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.annotation_type.as_deref().unwrap_or("note");
        write!(f, "- [{kind}] {}", self.content)?;
        if let Some(rating) = self.rating {
            write!(f, " ({rating}/5)")?;
        }
        writeln!(
            f,
            " by {} at {} (ID: {})",
            self.created_by,
            LocalDateTime(&self.created_at),
            self.id
        )
    }
}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimated = self
            .estimated_amount
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let actual = self
            .actual_amount
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        writeln!(
            f,
            "- **{}** {}: estimated {estimated}, actual {actual} {} [{}] (ID: {})",
            self.category, self.description, self.currency, self.payment_status, self.id
        )
    }
}

impl fmt::Display for DailyItinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.date)?;
        writeln!(f)?;
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time) {
            writeln!(
                f,
                "- From {} to {}",
                start.strftime("%H:%M"),
                end.strftime("%H:%M")
            )?;
        }
        writeln!(f, "- Cost: {:.2}", self.total_cost)?;
        writeln!(f)?;
        for item in &self.items {
            match &item.start_datetime {
                Some(start) => writeln!(
                    f,
                    "- {} {} ({})",
                    start.strftime("%H:%M"),
                    item.name,
                    item.item_type
                )?,
                None => writeln!(f, "- {} ({})", item.name, item.item_type)?,
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Summary of plan {}", self.plan_id)?;
        writeln!(f)?;
        writeln!(f, "- Items: {}", self.total_items)?;
        writeln!(f, "- Item cost: {:.2}", self.total_cost)?;
        writeln!(f, "- Budgeted: {:.2}", self.estimated_cost)?;
        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            writeln!(
                f,
                "- Span: {} to {} ({} days)",
                Schedule(start),
                Schedule(end),
                self.duration_days
            )?;
        }
        writeln!(f, "- Nights booked: {}", self.accommodation_days)?;
        writeln!(f, "- Transport legs: {}", self.transport_count)?;
        writeln!(f, "- Attractions: {}", self.attraction_count)?;

        if !self.by_type.is_empty() {
            writeln!(f)?;
            writeln!(f, "| Type | Count | Cost |")?;
            writeln!(f, "|:-|-:|-:|")?;
            for totals in &self.by_type {
                writeln!(
                    f,
                    "| {} | {} | {:.2} |",
                    totals.item_type, totals.count, totals.cost
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Budget of plan {}", self.plan_id)?;
        writeln!(f)?;
        writeln!(f, "- Ceiling: {:.2}", self.total_budget)?;
        writeln!(f, "- Estimated: {:.2}", self.total_estimated)?;
        writeln!(f, "- Actual: {:.2}", self.total_actual)?;
        writeln!(f, "- Remaining: {:.2}", self.remaining)?;
        writeln!(f, "- Lines: {}", self.line_count)
    }
}

impl fmt::Display for DuplicateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            DuplicateStatus::Complete => writeln!(
                f,
                "Duplicated plan as ID: {} with {} items",
                self.plan.id, self.copied_items
            )?,
            DuplicateStatus::Partial { reason } => writeln!(
                f,
                "Duplicated plan as ID: {} but items were not copied: {reason}",
                self.plan.id
            )?,
        }
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}
