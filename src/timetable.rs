//! Wall-clock timetables for individual trains, including dwell times.
//!
//! Unlike block occupancy traces, timetables add each station's halt time
//! and are anchored at an absolute start instant.

use crate::constants::{DEFAULT_START_TIME, MIN_TRAVEL_MINUTES};
use crate::error::EngineError;
use crate::geometry::haversine_km;
use crate::models::{LegType, Network, PriorityLevel, Section, Sections, Station, Stations};
use crate::time::{minutes_between, minutes_to_duration};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How a stop was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopLeg {
    Origin,
    Real,
    Inferred,
}

impl StopLeg {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Real => "real",
            Self::Inferred => "inferred",
        }
    }
}

impl From<LegType> for StopLeg {
    fn from(leg: LegType) -> Self {
        match leg {
            LegType::Real => Self::Real,
            LegType::Inferred => Self::Inferred,
        }
    }
}

/// Descriptive fields repeated on every stop of a train
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainMeta {
    pub train_id: String,
    pub train_name: String,
    pub train_type: String,
    pub priority_level: PriorityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainStop {
    pub train_id: String,
    pub train_name: String,
    pub train_type: String,
    pub priority_level: PriorityLevel,
    pub stop_index: usize,
    pub station_code: String,
    pub station_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub arrive_time: NaiveDateTime,
    pub depart_time: NaiveDateTime,
    /// Travel plus dwell accumulated since the origin departure
    pub eta_minutes_from_start: f64,
    /// Empty at the origin
    pub from_code: String,
    pub to_code: String,
    pub section_travel_time_min: f64,
    pub halt_time_min_at_station: f64,
    pub leg_type: StopLeg,
}

impl TrainStop {
    fn at(meta: &TrainMeta, station: &Station, stop_index: usize, time: NaiveDateTime) -> Self {
        Self {
            train_id: meta.train_id.clone(),
            train_name: meta.train_name.clone(),
            train_type: meta.train_type.clone(),
            priority_level: meta.priority_level,
            stop_index,
            station_code: station.code.clone(),
            station_name: station.name.clone(),
            latitude: station.lat,
            longitude: station.lon,
            arrive_time: time,
            depart_time: time,
            eta_minutes_from_start: 0.0,
            from_code: String::new(),
            to_code: String::new(),
            section_travel_time_min: 0.0,
            halt_time_min_at_station: 0.0,
            leg_type: StopLeg::Origin,
        }
    }

    /// Minutes spent standing at this stop
    #[must_use]
    pub fn dwell_minutes(&self) -> f64 {
        minutes_between(self.arrive_time, self.depart_time)
    }
}

/// Lay `sections` out in time from `start`.
///
/// The origin stop departs at `start`. Each following stop is reached after
/// the section's travel time (at least one minute) and left after the
/// station's halt time. A section ending at an unknown station still
/// consumes its travel time but produces no stop.
///
/// Returns `None` when there are no sections or the origin is unknown.
#[must_use]
pub fn build_timetable(
    meta: &TrainMeta,
    sections: &[Section],
    network: &Network,
    start: NaiveDateTime,
) -> Option<Vec<TrainStop>> {
    let first = sections.first()?;
    let origin = network.station(&first.from_code)?;

    let mut stops = vec![TrainStop {
        to_code: first.to_code.clone(),
        halt_time_min_at_station: origin.halt_min,
        ..TrainStop::at(meta, origin, 0, start)
    }];

    let mut current = start;
    let mut elapsed = 0.0;
    for section in sections {
        let travel = section.normalized_travel_min(MIN_TRAVEL_MINUTES);
        current += minutes_to_duration(travel);
        elapsed += travel;

        let Some(station) = network.station(&section.to_code) else {
            log::debug!("{}: skipping stop at unknown station {}", meta.train_id, section.to_code);
            continue;
        };

        let arrive = current;
        let stop_index = stops.len();
        let halt = station.halt_min.max(0.0);
        current += minutes_to_duration(halt);
        elapsed += halt;

        stops.push(TrainStop {
            depart_time: current,
            eta_minutes_from_start: elapsed,
            from_code: section.from_code.clone(),
            to_code: section.to_code.clone(),
            section_travel_time_min: travel,
            halt_time_min_at_station: halt,
            leg_type: section.leg_type.into(),
            ..TrainStop::at(meta, station, stop_index, arrive)
        });
    }

    Some(stops)
}

/// Turn a caller-given chain of station codes into sections.
///
/// Uses the network's section for each hop when there is one; otherwise a
/// direct inferred leg is derived from both stations' coordinates. Hops
/// that have neither, and hops from a station to itself, are dropped.
#[must_use]
pub fn resolve_station_chain(network: &Network, codes: &[String], avg_speed_kmph: f64) -> Vec<Section> {
    let mut sections = Vec::with_capacity(codes.len().saturating_sub(1));
    for hop in codes.windows(2) {
        let (from, to) = (hop[0].as_str(), hop[1].as_str());
        if from == to {
            continue;
        }
        if let Some(section) = network.section(from, to) {
            sections.push(section.clone());
            continue;
        }

        let (Some(a), Some(b)) = (network.station(from), network.station(to)) else {
            log::debug!("Dropping hop {from} -> {to}: unknown station");
            continue;
        };
        let (Some((lat1, lon1)), Some((lat2, lon2))) = (a.coordinates(), b.coordinates()) else {
            log::debug!("Dropping hop {from} -> {to}: missing coordinates");
            continue;
        };
        let distance = haversine_km(lat1, lon1, lat2, lon2);
        sections.push(Section::inferred(a, b, distance, avg_speed_kmph));
    }
    sections
}

/// Content-derived id for a user train, stable across runs
#[must_use]
pub fn user_train_id(codes: &[String]) -> String {
    format!("USR-{}", codes.join("."))
}

fn default_train_type() -> String {
    "Passenger".to_string()
}

fn default_start_time() -> NaiveDateTime {
    DEFAULT_START_TIME
}

/// A single train laid along a chain of station codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrainRequest {
    #[serde(default)]
    pub train_id: Option<String>,
    #[serde(default)]
    pub train_name: Option<String>,
    #[serde(default = "default_train_type")]
    pub train_type: String,
    #[serde(default)]
    pub priority_level: PriorityLevel,
    pub stations: Vec<String>,
    #[serde(default = "default_start_time")]
    pub start_time: NaiveDateTime,
}

impl UserTrainRequest {
    #[must_use]
    pub fn new(stations: Vec<String>) -> Self {
        Self {
            train_id: None,
            train_name: None,
            train_type: default_train_type(),
            priority_level: PriorityLevel::default(),
            stations,
            start_time: DEFAULT_START_TIME,
        }
    }

    #[must_use]
    pub fn meta(&self) -> TrainMeta {
        TrainMeta {
            train_id: self
                .train_id
                .clone()
                .unwrap_or_else(|| user_train_id(&self.stations)),
            train_name: self
                .train_name
                .clone()
                .unwrap_or_else(|| "User Train".to_string()),
            train_type: self.train_type.clone(),
            priority_level: self.priority_level,
        }
    }

    /// Build the timetable of this train over `network`
    ///
    /// # Errors
    ///
    /// Returns an error if no hop of the chain can be resolved or the
    /// origin station is unknown.
    pub fn timetable(&self, network: &Network, avg_speed_kmph: f64) -> Result<Vec<TrainStop>, EngineError> {
        let meta = self.meta();
        let sections = resolve_station_chain(network, &self.stations, avg_speed_kmph);
        if sections.is_empty() {
            return Err(EngineError::invalid_train(
                &meta.train_id,
                "no valid path built from provided stations",
            ));
        }
        build_timetable(&meta, &sections, network, self.start_time)
            .ok_or_else(|| EngineError::invalid_train(&meta.train_id, "origin not found"))
    }
}
