//! Seating and booking engine for a venue hall: table availability over time
//! windows, occupied-slot indexing, merged reservation ranges, and group
//! seat assignment.

pub mod engine;
pub mod layout;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod time;
