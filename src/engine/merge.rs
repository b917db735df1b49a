use crate::model::*;
use crate::time::MINUTES_PER_DAY;

use super::availability::merge_overlapping;

/// Collapse touching or overlapping windows into maximal ranges, ordered by
/// start. A midnight-spanning window is placed on a linear axis with its
/// end pushed past 1440, so it sorts by its start and merges with late
/// evening windows, never with same-day early-morning ones.
///
/// A merged run of 24 hours or longer is clamped to end one minute before
/// its start (`00:00-23:59` for a day booked from midnight).
pub fn merge_ranges(windows: &[TimeWindow]) -> Vec<TimeWindow> {
    let mut spans: Vec<Span> = windows
        .iter()
        .filter(|w| w.start_time != w.end_time)
        .map(TimeWindow::linear)
        .collect();
    spans.sort_by_key(|s| s.start);

    merge_overlapping(&spans)
        .into_iter()
        .filter_map(|s| {
            let end = s.end.min(s.start + MINUTES_PER_DAY - 1) % MINUTES_PER_DAY;
            Some(TimeWindow {
                start_time: TimeOfDay::from_minutes(s.start)?,
                end_time: TimeOfDay::from_minutes(end)?,
            })
        })
        .collect()
}

/// Display status of a table on `date`. Bookings on `today` are flagged
/// separately from bookings on other dates.
pub fn reservation_status(table: &Table, date: &str, today: &str) -> ReservationStatus {
    let windows: Vec<TimeWindow> = table.windows_on(date).collect();
    if windows.is_empty() {
        return ReservationStatus::Free;
    }
    let ranges = merge_ranges(&windows);
    if date == today {
        ReservationStatus::ReservedToday { ranges }
    } else {
        ReservationStatus::Reserved { ranges }
    }
}
