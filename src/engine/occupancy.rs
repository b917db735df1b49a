use std::collections::BTreeSet;

use crate::model::*;
use crate::time::SLOT_MINUTES;

// ── Slot occupancy index ──────────────────────────────────────────
//
// Recomputed from the seats on every call; nothing is cached.

/// Grid slots covered by a window: every 15-minute boundary `t` with
/// `start <= t < end`, per same-day part.
pub fn window_slots(window: TimeWindow) -> impl Iterator<Item = TimeOfDay> {
    window.parts().into_iter().flat_map(|part| {
        let first = part.start.div_ceil(SLOT_MINUTES) * SLOT_MINUTES;
        (first..part.end)
            .step_by(SLOT_MINUTES as usize)
            .filter_map(TimeOfDay::from_minutes)
    })
}

/// Union of the grid slots of every booking on `date`, sorted.
pub fn occupied_slots(table: &Table, date: &str) -> BTreeSet<TimeOfDay> {
    table
        .windows_on(date)
        .flat_map(window_slots)
        .collect()
}

pub fn is_slot_occupied(occupied: &BTreeSet<TimeOfDay>, hour: u32, minute: u32) -> bool {
    TimeOfDay::from_hm(hour, minute).is_some_and(|t| occupied.contains(&t))
}

pub fn is_booking_start(table: &Table, date: &str, slot: TimeOfDay) -> bool {
    table.windows_on(date).any(|w| w.start_time == slot)
}

/// Number of grid slots a booking covers, rounded up, never less than one.
pub fn booking_span(start: TimeOfDay, end: TimeOfDay) -> u32 {
    let (s, mut e) = (start.minutes(), end.minutes());
    if e < s {
        e += crate::time::MINUTES_PER_DAY;
    }
    (e - s).div_ceil(SLOT_MINUTES).max(1)
}

/// The booking covering `slot` on `date`. The lowest seat index wins when
/// several bookings cover the same slot.
pub fn booking_details_at(table: &Table, date: &str, slot: TimeOfDay) -> Option<BookingDetails> {
    table.occupants().find_map(|(_, occupant)| {
        let booking = occupant.booking_on(date)?;
        booking.window().contains(slot).then(|| BookingDetails {
            name: occupant.name.clone(),
            group_id: occupant.group_id.clone(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            note: booking.note.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn occupant(name: &str, group: &str, date: &str, start: &str, end: &str) -> Option<SeatOccupant> {
        Some(SeatOccupant {
            name: name.to_string(),
            group_id: group.to_string(),
            is_primary: true,
            booking: Some(
                Booking::new(date, TimeWindow::parse(start, end).unwrap(), Some(format!("{name}'s note"))).unwrap(),
            ),
        })
    }

    fn names(slots: &BTreeSet<TimeOfDay>) -> Vec<String> {
        slots.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_hour_booking_occupies_four_slots() {
        let mut table = Table::new(1, 2, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "10:00", "11:00");
        let slots = occupied_slots(&table, "2025-06-14");
        assert_eq!(names(&slots), vec!["10:00", "10:15", "10:30", "10:45"]);
        assert_eq!(booking_span(t("10:00"), t("11:00")), 4);
        assert_eq!(slots.len() as u32, booking_span(t("10:00"), t("11:00")));
    }

    #[test]
    fn other_dates_ignored() {
        let mut table = Table::new(1, 2, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-15", "10:00", "11:00");
        assert!(occupied_slots(&table, "2025-06-14").is_empty());
    }

    #[test]
    fn slots_from_several_seats_collapse() {
        let mut table = Table::new(1, 3, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "10:00", "11:00");
        table.seats[1] = occupant("Ada 2", "a", "2025-06-14", "10:00", "11:00");
        table.seats[2] = occupant("Bob", "b", "2025-06-14", "10:30", "11:30");
        let slots = occupied_slots(&table, "2025-06-14");
        assert_eq!(
            names(&slots),
            vec!["10:00", "10:15", "10:30", "10:45", "11:00", "11:15"]
        );
    }

    #[test]
    fn spanning_booking_fills_both_ends_of_day() {
        let mut table = Table::new(1, 1, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "23:30", "00:30");
        let slots = occupied_slots(&table, "2025-06-14");
        assert_eq!(names(&slots), vec!["00:00", "00:15", "23:30", "23:45"]);
        assert_eq!(booking_span(t("23:30"), t("00:30")), 4);
    }

    #[test]
    fn off_grid_window_rounds_to_covered_boundaries() {
        let w = TimeWindow::parse("10:10", "10:40").unwrap();
        let slots: Vec<String> = window_slots(w).map(|s| s.to_string()).collect();
        assert_eq!(slots, vec!["10:15", "10:30"]);
        assert_eq!(booking_span(t("10:10"), t("10:40")), 2);
    }

    #[test]
    fn booking_span_never_below_one() {
        assert_eq!(booking_span(t("10:00"), t("10:00")), 1);
        assert_eq!(booking_span(t("10:00"), t("10:05")), 1);
    }

    #[test]
    fn slot_membership() {
        let mut table = Table::new(1, 1, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "10:00", "11:00");
        let slots = occupied_slots(&table, "2025-06-14");
        assert!(is_slot_occupied(&slots, 10, 45));
        assert!(!is_slot_occupied(&slots, 11, 0));
        assert!(!is_slot_occupied(&slots, 25, 0));
    }

    #[test]
    fn booking_start_detection() {
        let mut table = Table::new(1, 1, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "10:00", "11:00");
        assert!(is_booking_start(&table, "2025-06-14", t("10:00")));
        assert!(!is_booking_start(&table, "2025-06-14", t("10:15")));
        assert!(!is_booking_start(&table, "2025-06-15", t("10:00")));
    }

    #[test]
    fn details_prefer_lowest_seat() {
        let mut table = Table::new(1, 3, Shape::Round);
        table.seats[1] = occupant("Ada", "a", "2025-06-14", "10:00", "11:00");
        table.seats[2] = occupant("Bob", "b", "2025-06-14", "10:30", "12:00");

        let d = booking_details_at(&table, "2025-06-14", t("10:30")).unwrap();
        assert_eq!(d.name, "Ada");
        assert_eq!(d.group_id, "a");
        assert_eq!(d.note.as_deref(), Some("Ada's note"));

        let d = booking_details_at(&table, "2025-06-14", t("11:00")).unwrap();
        assert_eq!(d.name, "Bob");
        assert_eq!(d.start_time, t("10:30"));
        assert_eq!(d.end_time, t("12:00"));

        assert!(booking_details_at(&table, "2025-06-14", t("12:00")).is_none());
    }

    #[test]
    fn occupied_slots_is_pure() {
        let mut table = Table::new(1, 2, Shape::Round);
        table.seats[0] = occupant("Ada", "a", "2025-06-14", "18:00", "20:00");
        let first = occupied_slots(&table, "2025-06-14");
        let second = occupied_slots(&table, "2025-06-14");
        assert_eq!(first, second);
    }
}
