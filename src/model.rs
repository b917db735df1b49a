use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::EngineError;
use crate::time::{parse_time_to_minutes, MINUTES_PER_DAY};

/// Minutes since midnight. The only time unit.
pub type Minutes = u32;

/// Identifier shared by every seat of one party.
pub type GroupId = String;

/// Half-open interval `[start, end)` on a linear minute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Minutes,
    pub end: Minutes,
}

impl Span {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Minutes) -> bool {
        self.start <= t && t < self.end
    }
}

/// A wall-clock time on the 24-hour dial, stored as minutes since midnight.
///
/// Parses from `"H:MM"` or `"HH:MM"` and always renders zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(Minutes);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn from_minutes(minutes: Minutes) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    pub fn minutes(self) -> Minutes {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time_to_minutes(s).map(Self)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// A start/end pair on the 24-hour dial. `end < start` means the window
/// runs past midnight and ends on the following day.
///
/// Deserialization goes through [`TimeWindow::new`], so equal ends are
/// rejected there too. A struct literal can still build one; the engine
/// checks again on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            start_time: TimeOfDay,
            end_time: TimeOfDay,
        }

        let raw = Raw::deserialize(deserializer)?;
        TimeWindow::new(raw.start_time, raw.end_time).map_err(serde::de::Error::custom)
    }
}

impl TimeWindow {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self, EngineError> {
        if start_time == end_time {
            return Err(EngineError::ZeroLengthBooking(start_time));
        }
        Ok(Self { start_time, end_time })
    }

    /// Parse both ends from `"HH:MM"` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, EngineError> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub fn spans_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Decompose into same-day half-open spans: one for a normal window,
    /// `[start, 1440)` and `[0, end)` for a midnight-spanning one.
    /// A zero-length window yields nothing.
    pub fn parts(&self) -> Vec<Span> {
        let (s, e) = (self.start_time.minutes(), self.end_time.minutes());
        if s < e {
            vec![Span::new(s, e)]
        } else if e < s {
            let mut parts = vec![Span::new(s, MINUTES_PER_DAY)];
            if e > 0 {
                parts.push(Span::new(0, e));
            }
            parts
        } else {
            Vec::new()
        }
    }

    /// The window on a linear axis where a midnight-spanning end is pushed
    /// past 1440.
    pub fn linear(&self) -> Span {
        let s = self.start_time.minutes();
        let mut e = self.end_time.minutes();
        if e <= s {
            e += MINUTES_PER_DAY;
        }
        Span::new(s, e)
    }

    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.parts().iter().any(|p| p.contains_instant(t.minutes()))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}

/// Table identifier as found in layout data: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableId {
    Num(u64),
    Text(String),
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableId::Num(n) => write!(f, "{n}"),
            TableId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TableId {
    fn from(n: u64) -> Self {
        TableId::Num(n)
    }
}

impl From<&str> for TableId {
    fn from(s: &str) -> Self {
        TableId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Round,
    Rectangle,
}

/// A time reservation carried by a seat. Persisted with the start under
/// the key `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub date: String,
    #[serde(rename = "time")]
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Booking {
    pub fn new(
        date: impl Into<String>,
        window: TimeWindow,
        note: Option<String>,
    ) -> Result<Self, EngineError> {
        let date = date.into();
        crate::time::validate_date(&date)?;
        Ok(Self {
            date,
            start_time: window.start_time,
            end_time: window.end_time,
            note,
        })
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub fn is_on(&self, date: &str) -> bool {
        self.date == date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatOccupant {
    pub name: String,
    pub group_id: GroupId,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
}

impl SeatOccupant {
    /// The booking, if it falls on `date`.
    pub fn booking_on(&self, date: &str) -> Option<&Booking> {
        self.booking.as_ref().filter(|b| b.is_on(date))
    }
}

/// A seating unit. `seats.len() == chair_count` after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub chair_count: u32,
    pub seats: Vec<Option<SeatOccupant>>,
    #[serde(default)]
    pub shape: Shape,
    /// Rendering fields (position, rotation, label...) carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Table {
    pub fn new(id: impl Into<TableId>, chair_count: u32, shape: Shape) -> Self {
        Self {
            id: id.into(),
            chair_count,
            seats: vec![None; chair_count as usize],
            shape,
            extra: serde_json::Map::new(),
        }
    }

    pub fn occupants(&self) -> impl Iterator<Item = (usize, &SeatOccupant)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|o| (i, o)))
    }

    /// Windows of every booking on `date`, in seat order.
    pub fn windows_on<'a>(&'a self, date: &'a str) -> impl Iterator<Item = TimeWindow> + 'a {
        self.occupants()
            .filter_map(move |(_, o)| o.booking_on(date))
            .map(Booking::window)
    }
}

/// A guest waiting to be seated. An empty name on a companion is replaced
/// with a "Guest of <primary>" placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
}

impl Guest {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn companion() -> Self {
        Self::default()
    }
}

/// Guests booked together. `guests[0]` is the primary guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub group_id: GroupId,
    pub guests: Vec<Guest>,
}

impl Party {
    /// New party with a freshly generated group id.
    pub fn new(guests: Vec<Guest>) -> Self {
        Self {
            group_id: ulid::Ulid::new().to_string(),
            guests,
        }
    }

    pub fn with_group_id(group_id: impl Into<GroupId>, guests: Vec<Guest>) -> Self {
        Self {
            group_id: group_id.into(),
            guests,
        }
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

/// Events published on every table mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    TableInserted {
        table_id: TableId,
        chair_count: u32,
    },
    TableRemoved {
        table_id: TableId,
    },
    GroupSeated {
        table_id: TableId,
        group_id: GroupId,
        seats: Vec<usize>,
        booking: Booking,
    },
    SeatCleared {
        table_id: TableId,
        seat: usize,
        occupant: SeatOccupant,
    },
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub name: String,
    pub group_id: GroupId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub note: Option<String>,
}

/// Display status of one table on one date.
///
/// `ranges` are merged booking windows. A run that covers a full day or
/// more has no distinct end on the dial and is reported as ending one
/// minute before its start, e.g. `00:00-23:59`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Free,
    Reserved { ranges: Vec<TimeWindow> },
    ReservedToday { ranges: Vec<TimeWindow> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    Seated { group_id: GroupId, seats: Vec<usize> },
    /// The window collides with bookings of these groups; nothing was changed.
    Overlap { conflicting: Vec<GroupId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub id: TableId,
    pub chair_count: u32,
    pub shape: Shape,
    pub empty_seats: usize,
}
