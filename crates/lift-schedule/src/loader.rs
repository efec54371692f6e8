//! CSV manifest loader.
//!
//! # CSV format
//!
//! One row per passenger, in arrival order.  A row named `DUMMY` ends the
//! manifest; later rows are ignored.
//!
//! ```csv
//! origin,destination,arrival,patience,name
//! 0,2,0,152,User 1
//! 4,1,38,1000,User 2
//! 0,0,9999,1000,DUMMY
//! ```
//!
//! `patience` counts ticks from `arrival`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ManifestEntry, PassengerManifest, ScheduleError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestRecord {
    origin:      u8,
    destination: u8,
    arrival:     u64,
    patience:    u64,
    name:        String,
}

impl From<ManifestRecord> for ManifestEntry {
    fn from(r: ManifestRecord) -> Self {
        ManifestEntry::new(r.origin, r.destination, r.arrival, r.patience, r.name.trim())
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a passenger manifest from a CSV file.
pub fn load_manifest_csv(path: &Path) -> Result<PassengerManifest, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_manifest_reader(file)
}

/// Like [`load_manifest_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for manifests compiled
/// into a binary.
pub fn load_manifest_reader<R: Read>(reader: R) -> Result<PassengerManifest, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries: Vec<ManifestEntry> = Vec::new();

    for (line, result) in csv_reader.deserialize::<ManifestRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(format!("row {}: {e}", line + 1)))?;
        let entry = ManifestEntry::from(row);
        let done = entry.is_sentinel();
        entries.push(entry);
        if done {
            break;
        }
    }

    PassengerManifest::new(entries)
}
