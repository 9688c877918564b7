//! Checkpoint store.
//!
//! The working table lives in memory as an owned [`AddressTable`]; the
//! [`CheckpointStore`] reads it once and writes it back atomically, and the
//! [`CheckpointGuard`] makes sure the write-back happens on every exit path.
//!
//! Only the address, region and coordinate columns are interpreted. Every
//! other column is carried through untouched, in its original position.

mod guard;
mod store;
mod table;

pub use guard::{CheckpointGuard, StatsReporter};
pub use store::CheckpointStore;
pub use table::{AddressRecord, AddressTable};

use crate::config::{
    DEFAULT_ADDRESS_COLUMN, DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN, DEFAULT_REGION_COLUMN,
    DEFAULT_REQUIRED_COLUMNS,
};

/// Column headers the table is read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Free-text street address (required)
    pub address: String,
    /// Free-text region (required)
    pub region: String,
    /// Latitude column, appended when missing
    pub lat: String,
    /// Longitude column, appended when missing
    pub lon: String,
    /// Business columns that must exist but are never read
    pub required: Vec<String>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS_COLUMN.to_string(),
            region: DEFAULT_REGION_COLUMN.to_string(),
            lat: DEFAULT_LAT_COLUMN.to_string(),
            lon: DEFAULT_LON_COLUMN.to_string(),
            required: DEFAULT_REQUIRED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}
