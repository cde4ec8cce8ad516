//! CSV writers for merged stations, the augmented section list and schedules.
//!
//! Each writer comes in two flavours: `*_to` streams into any `io::Write`
//! and reports raw `csv` errors, the path variant creates the file and
//! attaches the path to the error.

use crate::error::EngineError;
use crate::models::{Section, Station};
use crate::timetable::TrainStop;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Serialize)]
struct StationRecord<'a> {
    #[serde(rename = "Station Code")]
    code: &'a str,
    #[serde(rename = "Station Name")]
    name: &'a str,
    #[serde(rename = "Platform Count")]
    platform_count: u32,
    #[serde(rename = "Halt Time (mins)")]
    halt_min: f64,
    #[serde(rename = "Latitude")]
    lat: Option<f64>,
    #[serde(rename = "Longitude")]
    lon: Option<f64>,
}

impl<'a> From<&'a Station> for StationRecord<'a> {
    fn from(station: &'a Station) -> Self {
        Self {
            code: &station.code,
            name: &station.name,
            platform_count: station.platform_count,
            halt_min: round_to(station.halt_min, 1),
            lat: station.lat,
            lon: station.lon,
        }
    }
}

#[derive(Serialize)]
struct SectionRecord<'a> {
    #[serde(rename = "From Station Code")]
    from_code: &'a str,
    #[serde(rename = "From Station Name")]
    from_name: &'a str,
    #[serde(rename = "To Station Code")]
    to_code: &'a str,
    #[serde(rename = "To Station Name")]
    to_name: &'a str,
    #[serde(rename = "Distance (km)")]
    distance_km: f64,
    #[serde(rename = "Average Travel Time (mins)")]
    travel_min: f64,
    #[serde(rename = "Leg Type")]
    leg_type: &'static str,
}

impl<'a> From<&'a Section> for SectionRecord<'a> {
    fn from(section: &'a Section) -> Self {
        Self {
            from_code: &section.from_code,
            from_name: &section.from_name,
            to_code: &section.to_code,
            to_name: &section.to_name,
            distance_km: round_to(section.distance_km, 3),
            travel_min: round_to(section.travel_min, 1),
            leg_type: section.leg_type.as_str(),
        }
    }
}

#[derive(Serialize)]
struct StopRecord<'a> {
    train_id: &'a str,
    train_name: &'a str,
    train_type: &'a str,
    priority_level: &'static str,
    stop_index: usize,
    station_code: &'a str,
    station_name: &'a str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    arrive_time_iso: String,
    depart_time_iso: String,
    eta_minutes_from_start: f64,
    from_code: &'a str,
    to_code: &'a str,
    section_travel_time_min: f64,
    halt_time_min_at_station: f64,
    leg_type: &'static str,
}

impl<'a> From<&'a TrainStop> for StopRecord<'a> {
    fn from(stop: &'a TrainStop) -> Self {
        Self {
            train_id: &stop.train_id,
            train_name: &stop.train_name,
            train_type: &stop.train_type,
            priority_level: stop.priority_level.as_str(),
            stop_index: stop.stop_index,
            station_code: &stop.station_code,
            station_name: &stop.station_name,
            latitude: stop.latitude,
            longitude: stop.longitude,
            arrive_time_iso: stop.arrive_time.format(ISO_FORMAT).to_string(),
            depart_time_iso: stop.depart_time.format(ISO_FORMAT).to_string(),
            eta_minutes_from_start: round_to(stop.eta_minutes_from_start, 1),
            from_code: &stop.from_code,
            to_code: &stop.to_code,
            section_travel_time_min: round_to(stop.section_travel_time_min, 1),
            halt_time_min_at_station: round_to(stop.halt_time_min_at_station, 1),
            leg_type: stop.leg_type.as_str(),
        }
    }
}

fn write_records<W, T, I>(writer: W, records: I) -> Result<(), csv::Error>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<(), EngineError>
where
    F: FnOnce(BufWriter<File>) -> Result<(), csv::Error>,
{
    let file = File::create(path).map_err(|e| EngineError::io(path, e))?;
    write(BufWriter::new(file)).map_err(|e| EngineError::csv(path, e))
}

/// Write merged stations with the master-data headers
///
/// # Errors
///
/// Returns an error if a record cannot be written to `writer`.
pub fn write_master_stations_to<'a, W, I>(writer: W, stations: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Station>,
{
    write_records(writer, stations.into_iter().map(StationRecord::from))
}

/// Write merged stations to the file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_master_stations<'a, I>(path: &Path, stations: I) -> Result<(), EngineError>
where
    I: IntoIterator<Item = &'a Station>,
{
    write_file(path, |w| write_master_stations_to(w, stations))?;
    log::info!("Wrote stations to {}", path.display());
    Ok(())
}

/// Write real and inferred sections, tagged with their leg type
///
/// # Errors
///
/// Returns an error if a record cannot be written to `writer`.
pub fn write_augmented_sections_to<'a, W, I>(writer: W, sections: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Section>,
{
    write_records(writer, sections.into_iter().map(SectionRecord::from))
}

/// Write the augmented section list to the file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_augmented_sections<'a, I>(path: &Path, sections: I) -> Result<(), EngineError>
where
    I: IntoIterator<Item = &'a Section>,
{
    write_file(path, |w| write_augmented_sections_to(w, sections))?;
    log::info!("Wrote sections to {}", path.display());
    Ok(())
}

/// Write one row per timetable stop
///
/// # Errors
///
/// Returns an error if a record cannot be written to `writer`.
pub fn write_schedule_to<W: Write>(writer: W, stops: &[TrainStop]) -> Result<(), csv::Error> {
    write_records(writer, stops.iter().map(StopRecord::from))
}

/// Write a schedule to the file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_schedule(path: &Path, stops: &[TrainStop]) -> Result<(), EngineError> {
    write_file(path, |w| write_schedule_to(w, stops))?;
    log::info!("Wrote {} schedule rows to {}", stops.len(), path.display());
    Ok(())
}
