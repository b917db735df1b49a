mod availability;
mod conflict;
mod error;
mod merge;
mod mutations;
mod occupancy;
mod queries;
mod seating;

pub use availability::{
    available_seat_count, free_spans, is_available, merge_overlapping, subtract_intervals, windows_overlap,
};
pub use error::EngineError;
pub use merge::{merge_ranges, reservation_status};
pub use occupancy::{
    booking_details_at, booking_span, is_booking_start, is_slot_occupied, occupied_slots, window_slots,
};
pub use seating::{assign_group, clear_group, clear_seat, count_empty_seats, empty_seat_indices};

pub(crate) use conflict::validate_table;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::model::*;
use crate::notify::NotifyHub;

pub type SharedTable = Arc<RwLock<Table>>;

/// Owns the hall's tables and serializes changes per table.
///
/// The free functions in this module are pure and lock-free. `Engine` wraps
/// them so that the overlap check and the seat assignment of one booking
/// run under the same table write lock; bookings on different tables never
/// contend.
pub struct Engine {
    pub(super) tables: DashMap<TableId, SharedTable>,
    pub notify: Arc<NotifyHub>,
}

impl Engine {
    pub fn new(notify: Arc<NotifyHub>) -> Self {
        Self {
            tables: DashMap::new(),
            notify,
        }
    }

    pub fn get_table(&self, id: &TableId) -> Option<SharedTable> {
        self.tables.get(id).map(|e| e.value().clone())
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub(super) fn require_table(&self, id: &TableId) -> Result<SharedTable, EngineError> {
        self.get_table(id).ok_or_else(|| EngineError::NotFound(id.clone()))
    }

    /// Publish an event for `table_id`.
    pub(super) fn publish(&self, table_id: &TableId, event: Event) {
        self.notify.send(table_id, &event);
    }
}
