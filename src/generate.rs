//! Seeded bulk schedule generation over a built network, for demos and load tests.

use crate::models::{build_adjacency, Adjacency, Network, PriorityLevel, Section, Sections, Stations};
use crate::timetable::{build_timetable, TrainMeta, TrainStop};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const TRAIN_TYPES: [&str; 5] = ["Passenger", "Express", "Superfast", "Freight", "Special"];

const MIN_STOPS: usize = 5;
const MAX_STOPS: usize = 10;
const START_ATTEMPTS: usize = 50;
const WALK_STEP_CAP: usize = 200;
const ATTEMPTS_PER_TRAIN: usize = 10;

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.random_range(0..items.len()))
    }
}

/// Random walk without revisits from a random station with outgoing sections.
///
/// Aims for between `min_stops - 1` and `max_stops - 1` legs and returns an
/// empty route if the walk dead-ends before `min_stops - 1` legs.
pub fn pick_route<R: Rng>(
    rng: &mut R,
    adjacency: &Adjacency,
    station_codes: &[&str],
    min_stops: usize,
    max_stops: usize,
) -> Vec<Section> {
    if adjacency.is_empty() {
        return Vec::new();
    }

    let mut start = pick(rng, station_codes).copied();
    let mut attempts = 0;
    while !start.is_some_and(|code| adjacency.contains_key(code)) && attempts < START_ATTEMPTS {
        start = pick(rng, station_codes).copied();
        attempts += 1;
    }
    let Some(start) = start.filter(|code| adjacency.contains_key(*code)) else {
        return Vec::new();
    };

    let min_legs = min_stops.saturating_sub(1);
    let target_legs = rng.random_range(min_legs..=max_stops.saturating_sub(1).max(min_legs));

    let mut visited: HashSet<&str> = HashSet::from([start]);
    let mut route: Vec<Section> = Vec::new();
    let mut current = start;
    for _ in 0..WALK_STEP_CAP {
        let options: Vec<&Section> = adjacency
            .get(current)
            .map(|next| {
                next.iter()
                    .filter(|(to, _)| !visited.contains(to.as_str()))
                    .map(|(_, section)| section)
                    .collect()
            })
            .unwrap_or_default();
        let Some(&section) = pick(rng, &options) else {
            break;
        };
        route.push(section.clone());
        visited.insert(section.to_code.as_str());
        current = section.to_code.as_str();
        if route.len() >= target_legs {
            break;
        }
    }

    if route.len() < min_legs {
        return Vec::new();
    }
    route
}

/// Generate up to `num_trains` random trains and lay out their timetables.
///
/// Identical network, start and seed always give the identical schedule.
/// Gives up after `num_trains * 10` route attempts, so sparse networks may
/// yield fewer trains.
#[must_use]
pub fn generate_schedule(network: &Network, num_trains: usize, start: NaiveDateTime, seed: u64) -> Vec<TrainStop> {
    let mut rng = StdRng::seed_from_u64(seed);
    let sections: Vec<Section> = network.sections().into_iter().cloned().collect();
    let adjacency = build_adjacency(&sections);
    let station_codes: Vec<&str> = network.stations().into_iter().map(|s| s.code.as_str()).collect();

    let mut schedule = Vec::new();
    let mut generated = 0;
    let mut attempts = 0;
    while generated < num_trains && attempts < num_trains * ATTEMPTS_PER_TRAIN {
        attempts += 1;
        let route = pick_route(&mut rng, &adjacency, &station_codes, MIN_STOPS, MAX_STOPS);
        if route.is_empty() {
            continue;
        }

        let number = generated + 1;
        let train_type = pick(&mut rng, &TRAIN_TYPES).copied().unwrap_or(TRAIN_TYPES[0]);
        let priority_level = pick(&mut rng, &PriorityLevel::ALL).copied().unwrap_or_default();
        let meta = TrainMeta {
            train_id: format!("T{number:03}"),
            train_name: format!("Auto {number}"),
            train_type: train_type.to_string(),
            priority_level,
        };

        let Some(stops) = build_timetable(&meta, &route, network, start) else {
            continue;
        };
        schedule.extend(stops);
        generated += 1;
    }

    if generated < num_trains {
        log::warn!("Generated {generated} of {num_trains} requested trains after {attempts} attempts");
    } else {
        log::debug!("Generated {generated} trains with {} stops", schedule.len());
    }

    schedule
}
