use crate::model::*;
use crate::time::MINUTES_PER_DAY;

use super::occupancy::occupied_slots;

// ── Table-level overlap check ─────────────────────────────────────

/// Two windows intersect if any same-day part of one overlaps any part of
/// the other. Midnight-spanning windows contribute two parts each.
pub fn windows_overlap(a: &TimeWindow, b: &TimeWindow) -> bool {
    let b_parts = b.parts();
    a.parts()
        .iter()
        .any(|pa| b_parts.iter().any(|pb| pa.overlaps(pb)))
}

/// `true` when no existing window intersects the candidate.
pub fn is_available(existing: &[TimeWindow], candidate: &TimeWindow) -> bool {
    !existing.iter().any(|w| windows_overlap(w, candidate))
}

/// Coarse table-level answer: the whole table if nothing booked on `date`
/// collides with the candidate, otherwise zero.
pub fn available_seat_count(table: &Table, date: &str, candidate: &TimeWindow) -> u32 {
    let existing: Vec<TimeWindow> = table.windows_on(date).collect();
    if is_available(&existing, candidate) {
        table.chair_count
    } else {
        0
    }
}

/// Unbooked stretches of `date` on the slot grid, as spans on `[0, 1440)`.
/// A span ending at 1440 runs to midnight.
pub fn free_spans(table: &Table, date: &str) -> Vec<Span> {
    use crate::time::SLOT_MINUTES;
    let occupied: Vec<Span> = occupied_slots(table, date)
        .into_iter()
        .map(|t| Span::new(t.minutes(), t.minutes() + SLOT_MINUTES))
        .collect();
    let occupied = merge_overlapping(&occupied);
    subtract_intervals(&[Span::new(0, MINUTES_PER_DAY)], &occupied)
}

/// Merge sorted overlapping/adjacent intervals into disjoint intervals.
pub fn merge_overlapping(sorted: &[Span]) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::new();
    for &span in sorted {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end {
                last.end = last.end.max(span.end);
                continue;
            }
        merged.push(span);
    }
    merged
}

pub fn subtract_intervals(base: &[Span], to_remove: &[Span]) -> Vec<Span> {
    let mut result = Vec::new();
    let mut ri = 0;

    for &b in base {
        let mut current_start = b.start;
        let current_end = b.end;

        while ri < to_remove.len() && to_remove[ri].end <= current_start {
            ri += 1;
        }

        let mut j = ri;
        while j < to_remove.len() && to_remove[j].start < current_end {
            let r = &to_remove[j];
            if r.start > current_start {
                result.push(Span::new(current_start, r.start));
            }
            current_start = current_start.max(r.end);
            j += 1;
        }

        if current_start < current_end {
            result.push(Span::new(current_start, current_end));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end).unwrap()
    }

    fn booked_table(bookings: &[(&str, &str, &str)]) -> Table {
        let mut table = Table::new(1, bookings.len().max(4) as u32, Shape::Round);
        for (i, (date, start, end)) in bookings.iter().enumerate() {
            table.seats[i] = Some(SeatOccupant {
                name: format!("guest {i}"),
                group_id: format!("g{i}"),
                is_primary: true,
                booking: Some(Booking::new(*date, w(start, end), None).unwrap()),
            });
        }
        table
    }

    // ── is_available ────────────────────────────────────

    #[test]
    fn empty_table_is_available() {
        assert!(is_available(&[], &w("18:00", "20:00")));
        assert!(is_available(&[], &w("23:00", "01:00")));
    }

    #[test]
    fn plain_overlap() {
        assert!(!is_available(&[w("18:00", "20:00")], &w("19:00", "21:00")));
        assert!(!is_available(&[w("18:00", "20:00")], &w("18:30", "19:30")));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        assert!(is_available(&[w("18:00", "20:00")], &w("20:00", "22:00")));
        assert!(is_available(&[w("20:00", "22:00")], &w("18:00", "20:00")));
    }

    #[test]
    fn spanning_booking_blocks_early_morning() {
        assert!(!is_available(&[w("23:00", "01:00")], &w("00:30", "02:00")));
    }

    #[test]
    fn spanning_booking_blocks_late_evening() {
        assert!(!is_available(&[w("23:00", "01:00")], &w("22:00", "23:30")));
        assert!(is_available(&[w("23:00", "01:00")], &w("01:00", "23:00")));
    }

    #[test]
    fn two_spanning_windows_always_overlap() {
        assert!(!is_available(&[w("22:00", "00:30")], &w("23:30", "02:00")));
    }

    #[test]
    fn overlap_is_symmetric() {
        let pairs = [
            (w("18:00", "20:00"), w("19:00", "21:00")),
            (w("23:00", "01:00"), w("00:30", "02:00")),
            (w("10:00", "11:00"), w("11:00", "12:00")),
            (w("22:00", "00:00"), w("23:45", "00:15")),
        ];
        for (a, b) in pairs {
            assert_eq!(
                is_available(&[a], &b),
                is_available(&[b], &a),
                "asymmetric for {a} / {b}"
            );
        }
    }

    // ── available_seat_count ────────────────────────────

    #[test]
    fn seat_count_is_whole_table_or_zero() {
        let table = booked_table(&[("2025-06-14", "18:00", "20:00")]);
        assert_eq!(available_seat_count(&table, "2025-06-14", &w("19:00", "21:00")), 0);
        assert_eq!(available_seat_count(&table, "2025-06-14", &w("20:00", "21:00")), 4);
        // Other dates are ignored.
        assert_eq!(available_seat_count(&table, "2025-06-15", &w("19:00", "21:00")), 4);
    }

    // ── free_spans ──────────────────────────────────────

    #[test]
    fn free_spans_around_booking() {
        let table = booked_table(&[("2025-06-14", "10:00", "11:00")]);
        let free = free_spans(&table, "2025-06-14");
        assert_eq!(free, vec![Span::new(0, 600), Span::new(660, 1440)]);
    }

    #[test]
    fn free_spans_empty_day() {
        let table = Table::new(1, 4, Shape::Round);
        assert_eq!(free_spans(&table, "2025-06-14"), vec![Span::new(0, 1440)]);
    }

    #[test]
    fn free_spans_around_spanning_booking() {
        let table = booked_table(&[("2025-06-14", "23:00", "01:00")]);
        let free = free_spans(&table, "2025-06-14");
        assert_eq!(free, vec![Span::new(60, 1380)]);
    }

    // ── subtract_intervals / merge_overlapping ──────────

    #[test]
    fn subtract_middle_punch() {
        let base = vec![Span::new(100, 300)];
        let remove = vec![Span::new(150, 200)];
        let result = subtract_intervals(&base, &remove);
        assert_eq!(result, vec![Span::new(100, 150), Span::new(200, 300)]);
    }

    #[test]
    fn subtract_full_overlap() {
        let result = subtract_intervals(&[Span::new(100, 200)], &[Span::new(50, 250)]);
        assert!(result.is_empty());
    }

    #[test]
    fn merge_overlapping_adjacent() {
        let spans = vec![Span::new(100, 200), Span::new(200, 300), Span::new(400, 500)];
        let merged = merge_overlapping(&spans);
        assert_eq!(merged, vec![Span::new(100, 300), Span::new(400, 500)]);
    }
}
