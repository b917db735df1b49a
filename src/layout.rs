//! The saved hall blob: `{ "tables": [...], "hallElements": [...] }`.
//!
//! Seats are `null` or an occupant object; bookings use
//! `{ "date", "time", "endTime", "note" }`. Hall elements (walls, stage,
//! drawings) are kept as raw JSON.

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::model::Table;
use crate::time::parse_time_to_minutes;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HallLayout {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub hall_elements: Vec<serde_json::Value>,
}

impl HallLayout {
    /// Parse and validate. Malformed booking times surface as
    /// `InvalidTimeFormat`; other shape errors as `InvalidLayout`.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let raw: serde_json::Value =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidLayout(e.to_string()))?;
        check_booking_times(&raw)?;
        let layout: HallLayout =
            serde_json::from_value(raw).map_err(|e| EngineError::InvalidLayout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidLayout(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        use crate::limits::MAX_TABLES;
        if self.tables.len() > MAX_TABLES {
            return Err(EngineError::LimitExceeded("too many tables"));
        }
        let mut seen = std::collections::HashSet::new();
        for table in &self.tables {
            if !seen.insert(&table.id) {
                return Err(EngineError::AlreadyExists(table.id.clone()));
            }
            crate::engine::validate_table(table)?;
        }
        Ok(())
    }
}

/// Parse every `time`/`endTime` string under `tables[].seats[].booking`
/// so a bad clock value is reported as such rather than as a shape error.
fn check_booking_times(raw: &serde_json::Value) -> Result<(), EngineError> {
    let bookings = raw["tables"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|table| table["seats"].as_array())
        .flatten()
        .map(|seat| &seat["booking"]);
    for booking in bookings {
        for key in ["time", "endTime"] {
            if let Some(time) = booking[key].as_str() {
                parse_time_to_minutes(time)?;
            }
        }
    }
    Ok(())
}
