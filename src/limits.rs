//! Hard caps on input sizes. Exceeding any of them yields
//! `EngineError::LimitExceeded`.

pub const MAX_TABLES: usize = 10_000;
pub const MAX_CHAIRS_PER_TABLE: u32 = 500;
pub const MAX_PARTY_SIZE: usize = 500;
pub const MAX_NAME_LEN: usize = 256;
pub const MAX_NOTE_LEN: usize = 4096;
pub const MAX_GROUP_ID_LEN: usize = 128;
