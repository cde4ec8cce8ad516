//! Loading station and section master data from CSV.
//!
//! Loaders never fail: a missing or unreadable file and malformed rows are
//! logged and yield fewer (or no) records, so downstream stages always get
//! a usable, possibly empty, data set.

pub mod sections;
pub mod stations;

pub use sections::{load_sections, read_sections};
pub use stations::{load_stations, merge_stations, read_stations};

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Deserialize every well-formed row of a headed CSV stream, skipping the rest
fn read_rows<T: DeserializeOwned, R: Read>(reader: R, source: &str) -> Vec<T> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                log::debug!("{source}: skipping malformed row: {e}");
            }
        }
    }
    if skipped > 0 {
        log::warn!("{source}: skipped {skipped} malformed rows");
    }
    rows
}

/// Open `path` for reading, or log why it is unavailable
fn open_source(path: &Path) -> Option<File> {
    match File::open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("Source {} unavailable, using empty data: {e}", path.display());
            None
        }
    }
}

/// Lenient number parsing: blank or unparseable cells are absent
fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole non-negative count; fractional values are truncated
fn parse_count(cell: &str) -> u32 {
    let Some(value) = parse_number(cell) else {
        return 0;
    };
    if value <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value.min(f64::from(u32::MAX)) as u32;
    count
}
