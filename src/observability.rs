use crate::model::BookingOutcome;

/// Counter: booking attempts through the engine. Labels: outcome.
pub const BOOKINGS_TOTAL: &str = "hallplan_bookings_total";

/// Counter: seats emptied by clear_seat / clear_group.
pub const SEATS_CLEARED_TOTAL: &str = "hallplan_seats_cleared_total";

/// Gauge: tables held by the engine.
pub const TABLES_ACTIVE: &str = "hallplan_tables_active";

/// Map a booking outcome to a short label for metrics.
pub fn outcome_label(outcome: &BookingOutcome) -> &'static str {
    match outcome {
        BookingOutcome::Seated { .. } => "seated",
        BookingOutcome::Overlap { .. } => "overlap",
    }
}

/// Label for a booking rejected by input validation.
pub const OUTCOME_INVALID: &str = "invalid";
