use crate::model::*;

use super::availability::windows_overlap;
use super::EngineError;

pub(crate) fn validate_booking(booking: &Booking) -> Result<(), EngineError> {
    use crate::limits::*;
    crate::time::validate_date(&booking.date)?;
    validate_window(&booking.window())?;
    if booking.note.as_ref().is_some_and(|n| n.len() > MAX_NOTE_LEN) {
        return Err(EngineError::LimitExceeded("note too long"));
    }
    Ok(())
}

/// Reject a candidate window whose ends coincide.
pub(crate) fn validate_window(window: &TimeWindow) -> Result<(), EngineError> {
    if window.start_time == window.end_time {
        return Err(EngineError::ZeroLengthBooking(window.start_time));
    }
    Ok(())
}

pub(crate) fn validate_party(party: &Party) -> Result<(), EngineError> {
    use crate::limits::*;
    if party.is_empty() {
        return Err(EngineError::EmptyGroup);
    }
    if party.len() > MAX_PARTY_SIZE {
        return Err(EngineError::LimitExceeded("party too large"));
    }
    if party.group_id.len() > MAX_GROUP_ID_LEN {
        return Err(EngineError::LimitExceeded("group id too long"));
    }
    if party.guests.iter().any(|g| g.name.len() > MAX_NAME_LEN) {
        return Err(EngineError::LimitExceeded("guest name too long"));
    }
    Ok(())
}

/// Check the `seats.len() == chair_count` invariant and every stored booking.
pub(crate) fn validate_table(table: &Table) -> Result<(), EngineError> {
    use crate::limits::*;
    if table.chair_count == 0 {
        return Err(EngineError::InvalidLayout(format!(
            "table {} has no chairs",
            table.id
        )));
    }
    if table.chair_count > MAX_CHAIRS_PER_TABLE {
        return Err(EngineError::LimitExceeded("too many chairs on table"));
    }
    if table.seats.len() != table.chair_count as usize {
        return Err(EngineError::InvalidLayout(format!(
            "table {} has {} seat slots for {} chairs",
            table.id,
            table.seats.len(),
            table.chair_count
        )));
    }
    for (_, occupant) in table.occupants() {
        if let Some(booking) = &occupant.booking {
            validate_booking(booking)?;
        }
    }
    Ok(())
}

/// Groups whose booking on `date` intersects `candidate`, in seat order,
/// each listed once.
pub(crate) fn conflicting_groups(table: &Table, date: &str, candidate: &TimeWindow) -> Vec<GroupId> {
    let mut groups: Vec<GroupId> = Vec::new();
    for (_, occupant) in table.occupants() {
        let Some(booking) = occupant.booking_on(date) else {
            continue;
        };
        if windows_overlap(&booking.window(), candidate) && !groups.contains(&occupant.group_id) {
            groups.push(occupant.group_id.clone());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(date: &str, start: &str, end: &str) -> Booking {
        Booking::new(date, TimeWindow::parse(start, end).unwrap(), None).unwrap()
    }

    fn seat(group: &str, b: Booking) -> Option<SeatOccupant> {
        Some(SeatOccupant {
            name: group.to_string(),
            group_id: group.to_string(),
            is_primary: true,
            booking: Some(b),
        })
    }

    #[test]
    fn zero_length_booking_rejected() {
        let b = Booking {
            date: "2025-06-14".into(),
            start_time: "18:00".parse().unwrap(),
            end_time: "18:00".parse().unwrap(),
            note: None,
        };
        assert!(matches!(validate_booking(&b), Err(EngineError::ZeroLengthBooking(_))));
    }

    #[test]
    fn empty_party_rejected() {
        let p = Party::with_group_id("g", vec![]);
        assert_eq!(validate_party(&p), Err(EngineError::EmptyGroup));
    }

    #[test]
    fn seat_count_mismatch_rejected() {
        let mut table = Table::new(1, 4, Shape::Round);
        table.seats.pop();
        assert!(matches!(validate_table(&table), Err(EngineError::InvalidLayout(_))));
    }

    #[test]
    fn conflicting_groups_listed_once_in_seat_order() {
        let mut table = Table::new(1, 4, Shape::Round);
        table.seats[0] = seat("b", booking("2025-06-14", "19:00", "21:00"));
        table.seats[1] = seat("a", booking("2025-06-14", "18:00", "20:00"));
        table.seats[2] = seat("a", booking("2025-06-14", "18:00", "20:00"));
        table.seats[3] = seat("c", booking("2025-06-15", "18:00", "20:00"));

        let candidate = TimeWindow::parse("19:30", "22:00").unwrap();
        let groups = conflicting_groups(&table, "2025-06-14", &candidate);
        assert_eq!(groups, vec!["b".to_string(), "a".to_string()]);
    }
}
