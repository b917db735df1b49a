use crate::model::*;

use super::conflict::{validate_booking, validate_party};
use super::EngineError;

pub fn empty_seat_indices(table: &Table) -> Vec<usize> {
    table
        .seats
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.is_none().then_some(i))
        .collect()
}

pub fn count_empty_seats(table: &Table) -> usize {
    table.seats.iter().filter(|s| s.is_none()).count()
}

/// Seat a party on the first empty seats, left to right. `guests[0]` becomes
/// the primary occupant; every seat gets its own copy of `booking`.
///
/// Fails without touching the table when there are fewer empty seats than
/// guests. Returns the seat indices used, in guest order.
pub fn assign_group(table: &mut Table, party: &Party, booking: &Booking) -> Result<Vec<usize>, EngineError> {
    validate_party(party)?;
    validate_booking(booking)?;

    let empty = empty_seat_indices(table);
    if empty.len() < party.len() {
        return Err(EngineError::InsufficientSeats {
            requested: party.len(),
            available: empty.len(),
        });
    }

    let primary_name = party.guests[0].name.clone();
    let seats: Vec<usize> = empty.into_iter().take(party.len()).collect();
    for (i, (&seat, guest)) in seats.iter().zip(&party.guests).enumerate() {
        let name = if i > 0 && guest.name.is_empty() {
            format!("Guest of {primary_name}")
        } else {
            guest.name.clone()
        };
        table.seats[seat] = Some(SeatOccupant {
            name,
            group_id: party.group_id.clone(),
            is_primary: i == 0,
            booking: Some(booking.clone()),
        });
    }
    Ok(seats)
}

/// Empty one seat, handing back whoever sat there.
pub fn clear_seat(table: &mut Table, index: usize) -> Result<Option<SeatOccupant>, EngineError> {
    let chair_count = table.chair_count;
    let slot = table
        .seats
        .get_mut(index)
        .ok_or(EngineError::SeatOutOfRange { index, chair_count })?;
    Ok(slot.take())
}

/// Empty every seat held by `group_id`. Returns `(seat, occupant)` pairs in
/// seat order.
pub fn clear_group(table: &mut Table, group_id: &str) -> Vec<(usize, SeatOccupant)> {
    let mut removed = Vec::new();
    for (i, slot) in table.seats.iter_mut().enumerate() {
        if slot.as_ref().is_some_and(|o| o.group_id == group_id)
            && let Some(occupant) = slot.take() {
                removed.push((i, occupant));
            }
    }
    removed
}
