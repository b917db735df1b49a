use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::layout::HallLayout;
use crate::limits::*;
use crate::model::*;
use crate::observability;

use super::conflict::{conflicting_groups, validate_booking, validate_party, validate_table};
use super::seating::{assign_group, clear_group, clear_seat};
use super::{Engine, EngineError};

impl Engine {
    pub fn insert_table(&self, table: Table) -> Result<(), EngineError> {
        if self.tables.len() >= MAX_TABLES {
            return Err(EngineError::LimitExceeded("too many tables"));
        }
        validate_table(&table)?;

        let id = table.id.clone();
        let chair_count = table.chair_count;
        match self.tables.entry(id.clone()) {
            Entry::Occupied(_) => return Err(EngineError::AlreadyExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(table)));
            }
        }
        metrics::gauge!(observability::TABLES_ACTIVE).set(self.tables.len() as f64);
        self.publish(&id, Event::TableInserted { table_id: id.clone(), chair_count });
        Ok(())
    }

    /// Drop a table from the hall, returning its final state.
    pub async fn remove_table(&self, id: &TableId) -> Result<Table, EngineError> {
        let (_, shared) = self
            .tables
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))?;
        let table = shared.read().await.clone();
        metrics::gauge!(observability::TABLES_ACTIVE).set(self.tables.len() as f64);
        self.publish(id, Event::TableRemoved { table_id: id.clone() });
        self.notify.remove(id);
        Ok(table)
    }

    /// Add every table of a saved layout. All-or-nothing: the layout is
    /// validated in full, including id clashes with tables already held,
    /// before anything is inserted.
    pub fn load_layout(&self, layout: HallLayout) -> Result<usize, EngineError> {
        layout.validate()?;
        if self.tables.len() + layout.tables.len() > MAX_TABLES {
            return Err(EngineError::LimitExceeded("too many tables"));
        }
        if let Some(t) = layout.tables.iter().find(|t| self.tables.contains_key(&t.id)) {
            return Err(EngineError::AlreadyExists(t.id.clone()));
        }
        let count = layout.tables.len();
        for table in layout.tables {
            self.insert_table(table)?;
        }
        info!("loaded {count} tables");
        Ok(count)
    }

    /// Check the window against the table's bookings for `booking.date` and,
    /// if it is free, seat the party. Both happen under one write lock.
    ///
    /// An overlap is an ordinary outcome, not an error; the table is left
    /// unchanged.
    pub async fn book_group(
        &self,
        table_id: &TableId,
        party: &Party,
        booking: &Booking,
    ) -> Result<BookingOutcome, EngineError> {
        if let Err(e) = validate_party(party).and_then(|()| validate_booking(booking)) {
            metrics::counter!(observability::BOOKINGS_TOTAL, "outcome" => observability::OUTCOME_INVALID)
                .increment(1);
            return Err(e);
        }
        let shared = self.require_table(table_id)?;
        let mut guard = shared.write().await;

        let conflicting = conflicting_groups(&guard, &booking.date, &booking.window());
        let outcome = if conflicting.is_empty() {
            let seats = assign_group(&mut guard, party, booking)?;
            info!(
                "seated group {} ({} guests) at table {table_id} on {} {}",
                party.group_id,
                party.len(),
                booking.date,
                booking.window()
            );
            self.publish(
                table_id,
                Event::GroupSeated {
                    table_id: table_id.clone(),
                    group_id: party.group_id.clone(),
                    seats: seats.clone(),
                    booking: booking.clone(),
                },
            );
            BookingOutcome::Seated {
                group_id: party.group_id.clone(),
                seats,
            }
        } else {
            warn!(
                "table {table_id} unavailable on {} {}: overlaps {:?}",
                booking.date,
                booking.window(),
                conflicting
            );
            BookingOutcome::Overlap { conflicting }
        };

        metrics::counter!(observability::BOOKINGS_TOTAL, "outcome" => observability::outcome_label(&outcome))
            .increment(1);
        Ok(outcome)
    }

    pub async fn clear_seat(&self, table_id: &TableId, index: usize) -> Result<Option<SeatOccupant>, EngineError> {
        let shared = self.require_table(table_id)?;
        let mut guard = shared.write().await;
        let removed = clear_seat(&mut guard, index)?;
        if let Some(occupant) = &removed {
            self.seat_cleared(table_id, index, occupant.clone());
        }
        Ok(removed)
    }

    /// Empty every seat of a group, e.g. to cancel or rebook it.
    pub async fn clear_group(&self, table_id: &TableId, group_id: &str) -> Result<Vec<SeatOccupant>, EngineError> {
        let shared = self.require_table(table_id)?;
        let mut guard = shared.write().await;
        let removed = clear_group(&mut guard, group_id);
        Ok(removed
            .into_iter()
            .map(|(seat, occupant)| {
                self.seat_cleared(table_id, seat, occupant.clone());
                occupant
            })
            .collect())
    }

    fn seat_cleared(&self, table_id: &TableId, seat: usize, occupant: SeatOccupant) {
        info!("cleared seat {seat} at table {table_id} ({})", occupant.name);
        metrics::counter!(observability::SEATS_CLEARED_TOTAL).increment(1);
        self.publish(
            table_id,
            Event::SeatCleared {
                table_id: table_id.clone(),
                seat,
                occupant,
            },
        );
    }
}
