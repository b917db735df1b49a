use std::collections::BTreeSet;

use tracing::debug;

use crate::layout::HallLayout;
use crate::model::*;

use super::availability::{available_seat_count, free_spans, is_available};
use super::conflict::validate_window;
use super::merge::reservation_status;
use super::occupancy::{booking_details_at, occupied_slots};
use super::seating::count_empty_seats;
use super::{Engine, EngineError};

impl Engine {
    /// Table-level check: `true` when nothing booked at the table on `date`
    /// overlaps `window`.
    pub async fn check_availability(
        &self,
        table_id: &TableId,
        date: &str,
        window: &TimeWindow,
    ) -> Result<bool, EngineError> {
        crate::time::validate_date(date)?;
        validate_window(window)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        let existing: Vec<TimeWindow> = guard.windows_on(date).collect();
        let free = is_available(&existing, window);
        debug!("availability of table {table_id} on {date} {window}: {free}");
        Ok(free)
    }

    pub async fn available_seat_count(
        &self,
        table_id: &TableId,
        date: &str,
        window: &TimeWindow,
    ) -> Result<u32, EngineError> {
        crate::time::validate_date(date)?;
        validate_window(window)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        Ok(available_seat_count(&guard, date, window))
    }

    pub async fn occupied_slots(&self, table_id: &TableId, date: &str) -> Result<BTreeSet<TimeOfDay>, EngineError> {
        crate::time::validate_date(date)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        Ok(occupied_slots(&guard, date))
    }

    pub async fn booking_details_at(
        &self,
        table_id: &TableId,
        date: &str,
        slot: TimeOfDay,
    ) -> Result<Option<BookingDetails>, EngineError> {
        crate::time::validate_date(date)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        Ok(booking_details_at(&guard, date, slot))
    }

    pub async fn reservation_status(
        &self,
        table_id: &TableId,
        date: &str,
        today: &str,
    ) -> Result<ReservationStatus, EngineError> {
        crate::time::validate_date(date)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        Ok(reservation_status(&guard, date, today))
    }

    pub async fn free_spans(&self, table_id: &TableId, date: &str) -> Result<Vec<Span>, EngineError> {
        crate::time::validate_date(date)?;
        let shared = self.require_table(table_id)?;
        let guard = shared.read().await;
        Ok(free_spans(&guard, date))
    }

    /// Tables that can take the whole party for `window` on `date`: free in
    /// time and with enough empty seats. Sorted by id.
    pub async fn find_tables(
        &self,
        date: &str,
        window: &TimeWindow,
        party_size: usize,
    ) -> Result<Vec<TableId>, EngineError> {
        crate::time::validate_date(date)?;
        validate_window(window)?;
        let mut found = Vec::new();
        for shared in self.snapshot_handles() {
            let guard = shared.read().await;
            let existing: Vec<TimeWindow> = guard.windows_on(date).collect();
            if is_available(&existing, window) && count_empty_seats(&guard) >= party_size {
                found.push(guard.id.clone());
            }
        }
        found.sort();
        Ok(found)
    }

    pub async fn list_tables(&self) -> Vec<TableInfo> {
        let mut tables = Vec::with_capacity(self.tables.len());
        for shared in self.snapshot_handles() {
            let guard = shared.read().await;
            tables.push(TableInfo {
                id: guard.id.clone(),
                chair_count: guard.chair_count,
                shape: guard.shape,
                empty_seats: count_empty_seats(&guard),
            });
        }
        tables.sort_by(|a, b| a.id.cmp(&b.id));
        tables
    }

    /// Current state of every table as a layout blob, sorted by table id.
    /// Hall elements are owned by the caller and left empty.
    pub async fn snapshot(&self) -> HallLayout {
        let mut tables = Vec::with_capacity(self.tables.len());
        for shared in self.snapshot_handles() {
            tables.push(shared.read().await.clone());
        }
        tables.sort_by(|a, b| a.id.cmp(&b.id));
        HallLayout {
            tables,
            hall_elements: Vec::new(),
        }
    }

    /// Clone the table handles out of the map so no shard lock is held
    /// across an await.
    fn snapshot_handles(&self) -> Vec<super::SharedTable> {
        self.tables.iter().map(|e| e.value().clone()).collect()
    }
}
