//! Route resolution and block-occupancy traces for single trains.
//!
//! Occupancy clocks start at zero for every train. Dwell time is not added
//! and neither the departure time nor the accumulated delay shifts the
//! windows, so comparing two traces assumes both trains leave together.

use crate::error::EngineError;
use crate::models::{BlockId, BlockOccupancy, NameGraph};
use std::collections::HashMap;

/// Travel time lookup keyed by ordered station names
pub trait TravelTimes {
    fn travel_time(&self, from: &str, to: &str) -> Option<f64>;
}

impl TravelTimes for NameGraph {
    fn travel_time(&self, from: &str, to: &str) -> Option<f64> {
        NameGraph::travel_time(self, from, to)
    }
}

impl TravelTimes for HashMap<(String, String), f64> {
    fn travel_time(&self, from: &str, to: &str) -> Option<f64> {
        self.get(&(from.to_string(), to.to_string())).copied()
    }
}

/// Fewest-hop route between two station names.
///
/// Only routes of at least two stations are returned; anything else means
/// the train cannot be analysed.
#[must_use]
pub fn resolve_route(
    graph: &NameGraph,
    source: &str,
    destination: &str,
    max_hops: usize,
) -> Option<Vec<String>> {
    graph
        .shortest_path(source, destination, max_hops)
        .filter(|path| path.len() >= 2)
}

/// Walk consecutive stations of `path` and claim each block in turn.
///
/// A hop without a usable travel time falls back to `default_minutes`
/// instead of failing the route. Paths shorter than two stations yield no
/// occupancies.
///
/// # Errors
///
/// Returns an error if the accumulated clock stops being a finite number.
pub fn build_occupancies<T: TravelTimes + ?Sized>(
    path: &[String],
    travel_times: &T,
    default_minutes: f64,
) -> Result<Vec<BlockOccupancy>, EngineError> {
    let fallback = default_minutes.max(0.0);
    let mut clock = 0.0;
    let mut occupancies = Vec::with_capacity(path.len().saturating_sub(1));

    for hop in path.windows(2) {
        let (from, to) = (hop[0].as_str(), hop[1].as_str());
        let minutes = travel_times
            .travel_time(from, to)
            .filter(|t| t.is_finite() && *t >= 0.0)
            .unwrap_or_else(|| {
                log::debug!("No travel time for {from} -> {to}, assuming {fallback} min");
                fallback
            });

        occupancies.push(BlockOccupancy::new(BlockId::between(from, to), clock, clock + minutes)?);
        clock += minutes;
    }

    Ok(occupancies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn times(entries: &[(&str, &str, f64)]) -> HashMap<(String, String), f64> {
        entries
            .iter()
            .map(|(a, b, t)| ((a.to_string(), b.to_string()), *t))
            .collect()
    }

    #[test]
    fn test_clock_accumulates_travel_time() {
        let lookup = times(&[("A", "B", 10.0), ("B", "C", 4.5)]);
        let occupancies = build_occupancies(&path(&["A", "B", "C"]), &lookup, 5.0).expect("valid occupancies");

        assert_eq!(occupancies.len(), 2);
        assert_eq!(occupancies[0].block_id.as_str(), "A-B");
        assert_eq!((occupancies[0].start_time, occupancies[0].end_time), (0.0, 10.0));
        assert_eq!(occupancies[1].block_id.as_str(), "B-C");
        assert_eq!((occupancies[1].start_time, occupancies[1].end_time), (10.0, 14.5));
    }

    #[test]
    fn test_unknown_hop_uses_default() {
        let lookup = times(&[("A", "B", 10.0)]);
        let occupancies = build_occupancies(&path(&["A", "B", "Z"]), &lookup, 5.0).expect("valid occupancies");

        assert_eq!(occupancies[1].block_id.as_str(), "B-Z");
        assert_eq!((occupancies[1].start_time, occupancies[1].end_time), (10.0, 15.0));
    }

    #[test]
    fn test_invalid_lookup_value_uses_default() {
        let lookup = times(&[("A", "B", -3.0)]);
        let occupancies = build_occupancies(&path(&["A", "B"]), &lookup, 5.0).expect("valid occupancies");
        assert_eq!(occupancies[0].end_time, 5.0);
    }

    #[test]
    fn test_short_paths_have_no_occupancies() {
        let lookup = times(&[]);
        assert!(build_occupancies(&path(&["A"]), &lookup, 5.0).expect("empty trace").is_empty());
        assert!(build_occupancies(&[], &lookup, 5.0).expect("empty trace").is_empty());
    }

    #[test]
    fn test_overflowing_clock_is_rejected() {
        let lookup = times(&[("A", "B", f64::MAX), ("B", "C", f64::MAX)]);
        let result = build_occupancies(&path(&["A", "B", "C"]), &lookup, 5.0);
        assert!(matches!(result, Err(EngineError::InvalidOccupancy { .. })));
    }

    #[test]
    fn test_name_graph_lookup() {
        let sections = vec![
            Section::real(("A", "Alpha"), ("B", "Beta"), 5.0, 0.4),
            Section::real(("B", "Beta"), ("C", "Gamma"), 5.0, 8.0),
        ];
        let graph = NameGraph::from_sections(&sections, 1.0);
        let route = resolve_route(&graph, "Alpha", "Gamma", 16).expect("route should resolve");
        let occupancies = build_occupancies(&route, &graph, 5.0).expect("valid occupancies");

        assert_eq!(route, path(&["Alpha", "Beta", "Gamma"]));
        assert_eq!(occupancies[0].end_time, 1.0);
        assert_eq!(occupancies[1].end_time, 9.0);
    }

    #[test]
    fn test_resolve_route_rejects_single_station() {
        let sections = vec![Section::real(("A", "Alpha"), ("B", "Beta"), 5.0, 3.0)];
        let graph = NameGraph::from_sections(&sections, 1.0);
        assert!(resolve_route(&graph, "Alpha", "Alpha", 16).is_none());
        assert!(resolve_route(&graph, "Beta", "Alpha", 16).is_none());
    }
}
