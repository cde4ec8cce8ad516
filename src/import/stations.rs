use super::{open_source, parse_count, parse_number, read_rows};
use crate::models::{merge_station_sets, Station};
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct StationRow {
    #[serde(rename = "Station Code", default)]
    code: String,
    #[serde(rename = "Station Name", default)]
    name: String,
    #[serde(rename = "Platform Count", default)]
    platform_count: String,
    #[serde(rename = "Halt Time (mins)", default)]
    halt_min: String,
    #[serde(rename = "Latitude", default)]
    latitude: String,
    #[serde(rename = "Longitude", default)]
    longitude: String,
}

impl StationRow {
    fn into_station(self) -> Option<Station> {
        if self.code.is_empty() {
            return None;
        }
        let mut station = Station::new(self.code, self.name)
            .with_platforms(parse_count(&self.platform_count))
            .with_halt(parse_number(&self.halt_min).unwrap_or(0.0));
        station.lat = parse_number(&self.latitude);
        station.lon = parse_number(&self.longitude);
        Some(station)
    }
}

/// Read stations from a headed CSV stream.
///
/// Rows without a code are dropped. For a repeated code the first row is
/// kept unless a later row has coordinates the kept one lacks.
pub fn read_stations<R: Read>(reader: R, source: &str) -> IndexMap<String, Station> {
    let mut stations: IndexMap<String, Station> = IndexMap::new();
    for station in read_rows::<StationRow, _>(reader, source)
        .into_iter()
        .filter_map(StationRow::into_station)
    {
        match stations.get_mut(&station.code) {
            Some(existing) => {
                if existing.coordinates().is_none() && station.coordinates().is_some() {
                    *existing = station;
                }
            }
            None => {
                stations.insert(station.code.clone(), station);
            }
        }
    }
    log::debug!("{source}: loaded {} stations", stations.len());
    stations
}

/// Load stations from `path`; an unavailable file yields an empty set
#[must_use]
pub fn load_stations(path: &Path) -> IndexMap<String, Station> {
    match open_source(path) {
        Some(file) => read_stations(file, &path.display().to_string()),
        None => IndexMap::new(),
    }
}

/// Load both station lists and merge them, `primary` preferred field by field
#[must_use]
pub fn merge_stations(primary: &Path, secondary: &Path) -> IndexMap<String, Station> {
    let merged = merge_station_sets(&load_stations(primary), &load_stations(secondary));
    log::info!(
        "Merged {} stations ({} with coordinates)",
        merged.len(),
        merged.values().filter(|s| s.coordinates().is_some()).count()
    );
    merged
}
