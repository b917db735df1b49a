use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::engine::EngineError;
use crate::model::{Minutes, TimeOfDay};

pub const MINUTES_PER_DAY: Minutes = 1440;

/// Granularity of the occupancy grid.
pub const SLOT_MINUTES: Minutes = 15;

/// Convert `"HH:MM"` (hour and minute may be one or two digits) into
/// minutes since midnight.
pub fn parse_time_to_minutes(time: &str) -> Result<Minutes, EngineError> {
    let invalid = || EngineError::InvalidTimeFormat(time.to_string());

    // chrono skips leading whitespace in numeric fields; we don't.
    if !time.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(invalid());
    }
    let parsed = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())?;
    Ok(parsed.hour() * 60 + parsed.minute())
}

/// Format minutes as zero-padded `"HH:MM"`. Values past midnight wrap.
pub fn minutes_to_time(minutes: Minutes) -> String {
    let m = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Every grid point of one day, `00:00` up to the last step before `24:00`.
/// A zero step is treated as one minute.
pub fn day_slots(step: Minutes) -> impl Iterator<Item = TimeOfDay> {
    (0..MINUTES_PER_DAY)
        .step_by(step.max(1) as usize)
        .filter_map(TimeOfDay::from_minutes)
}

pub fn enumerate_day_slots(step: Minutes) -> Vec<TimeOfDay> {
    day_slots(step).collect()
}

/// Accept only `YYYY-MM-DD` calendar dates.
pub fn validate_date(date: &str) -> Result<(), EngineError> {
    let well_formed = date.len() == 10
        && date.as_bytes()[4] == b'-'
        && date.as_bytes()[7] == b'-'
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(EngineError::InvalidDateFormat(date.to_string()))
    }
}
