use crate::model::{TableId, TimeOfDay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidTimeFormat(String),
    InvalidDateFormat(String),
    ZeroLengthBooking(TimeOfDay),
    InsufficientSeats { requested: usize, available: usize },
    EmptyGroup,
    SeatOutOfRange { index: usize, chair_count: u32 },
    NotFound(TableId),
    AlreadyExists(TableId),
    InvalidLayout(String),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidTimeFormat(s) => {
                write!(f, "invalid time {s:?}: expected HH:MM between 00:00 and 23:59")
            }
            EngineError::InvalidDateFormat(s) => {
                write!(f, "invalid date {s:?}: expected YYYY-MM-DD")
            }
            EngineError::ZeroLengthBooking(t) => {
                write!(f, "booking starts and ends at {t}")
            }
            EngineError::InsufficientSeats {
                requested,
                available,
            } => {
                write!(
                    f,
                    "not enough seats: {requested} requested, {available} empty"
                )
            }
            EngineError::EmptyGroup => write!(f, "group has no guests"),
            EngineError::SeatOutOfRange { index, chair_count } => {
                write!(f, "seat {index} out of range for table with {chair_count} chairs")
            }
            EngineError::NotFound(id) => write!(f, "table not found: {id}"),
            EngineError::AlreadyExists(id) => write!(f, "table already exists: {id}"),
            EngineError::InvalidLayout(msg) => write!(f, "invalid layout: {msg}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
