use crate::config::AnalysisConfig;
use crate::models::{LegType, Section, Station};
use indexmap::IndexMap;
use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

mod augment;
mod names;
mod sections;
mod stations;

pub use augment::augment_with_nearest_neighbors;
pub use names::NameGraph;
pub use sections::{build_adjacency, Adjacency, Sections};
pub use stations::Stations;

/// Stations and directed sections of the rail network.
///
/// Built once per analysis and read-only afterwards, so a finished network
/// can be shared between threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub graph: DiGraph<Station, Section>,
    station_code_to_index: HashMap<String, NodeIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub stations: usize,
    pub located_stations: usize,
    pub real_sections: usize,
    pub inferred_sections: usize,
    /// Weakly connected components
    pub components: usize,
}

impl Network {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a network from stations and sections.
    ///
    /// Degenerate sections (empty or equal endpoints) and repeated ordered
    /// pairs are dropped. A section naming a station code the station set does
    /// not know adds a placeholder station without coordinates, so every
    /// section endpoint is always a station of the network.
    #[must_use]
    pub fn from_parts(stations: &IndexMap<String, Station>, sections: &[Section]) -> Self {
        let mut network = Self::new();
        for station in stations.values() {
            network.add_station(station.clone());
        }

        let mut placeholders = 0usize;
        let mut dropped = 0usize;
        for section in sections {
            if section.is_degenerate() {
                dropped += 1;
                continue;
            }
            for (code, name) in [
                (&section.from_code, &section.from_name),
                (&section.to_code, &section.to_name),
            ] {
                if network.station_index(code).is_none() {
                    network.add_station(Station::new(code.clone(), name.clone()));
                    placeholders += 1;
                }
            }
            if network.add_section(section.clone()).is_none() {
                dropped += 1;
            }
        }

        if placeholders > 0 {
            log::debug!("Added {placeholders} placeholder stations referenced only by sections");
        }
        if dropped > 0 {
            log::debug!("Dropped {dropped} degenerate or repeated sections");
        }

        network
    }

    /// Augment `base_sections` with nearest-neighbour legs and assemble the result
    #[must_use]
    pub fn build(
        stations: &IndexMap<String, Station>,
        base_sections: &[Section],
        config: &AnalysisConfig,
    ) -> Self {
        let sections = augment_with_nearest_neighbors(
            stations,
            base_sections,
            config.nearest_neighbors,
            config.avg_speed_kmph,
        );
        let network = Self::from_parts(stations, &sections);
        let summary = network.summary();
        log::info!(
            "Network built: {} stations ({} located), {} real + {} inferred sections, {} components",
            summary.stations,
            summary.located_stations,
            summary.real_sections,
            summary.inferred_sections,
            summary.components
        );
        network
    }

    #[must_use]
    pub fn summary(&self) -> NetworkSummary {
        let inferred_sections = self
            .graph
            .edge_weights()
            .filter(|s| s.leg_type == LegType::Inferred)
            .count();
        NetworkSummary {
            stations: self.graph.node_count(),
            located_stations: self.located_stations().len(),
            real_sections: self.graph.edge_count() - inferred_sections,
            inferred_sections,
            components: connected_components(&self.graph),
        }
    }

    /// Name-keyed view used for route search and travel-time lookup
    #[must_use]
    pub fn name_graph(&self, min_travel_minutes: f64) -> NameGraph {
        NameGraph::from_sections(self.graph.edge_weights(), min_travel_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(list: Vec<Station>) -> IndexMap<String, Station> {
        list.into_iter().map(|s| (s.code.clone(), s)).collect()
    }

    #[test]
    fn test_network_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Network>();
    }

    #[test]
    fn test_from_parts_adds_placeholder_endpoints() {
        let set = stations(vec![Station::new("A", "Alpha")]);
        let sections = vec![Section::real(("A", "Alpha"), ("B", "Beta"), 10.0, 12.0)];

        let network = Network::from_parts(&set, &sections);
        assert_eq!(network.graph.node_count(), 2);
        let b = network.station("B").expect("placeholder should exist");
        assert_eq!(b.name, "Beta");
        assert!(b.coordinates().is_none());
        assert!(network.has_section("A", "B"));
    }

    #[test]
    fn test_from_parts_drops_degenerate_and_repeated() {
        let set = stations(vec![Station::new("A", "Alpha"), Station::new("B", "Beta")]);
        let sections = vec![
            Section::real(("A", "Alpha"), ("B", "Beta"), 10.0, 12.0),
            Section::real(("A", "Alpha"), ("B", "Beta"), 10.0, 99.0),
            Section::real(("A", "Alpha"), ("A", "Alpha"), 0.0, 1.0),
        ];

        let network = Network::from_parts(&set, &sections);
        assert_eq!(network.graph.edge_count(), 1);
        assert_eq!(network.section("A", "B").map(|s| s.travel_min), Some(12.0));
    }

    #[test]
    fn test_summary_counts() {
        let set = stations(vec![
            Station::new("A", "Alpha").with_coordinates(0.0, 0.0),
            Station::new("B", "Beta").with_coordinates(0.0, 0.1),
            Station::new("C", "Gamma"),
        ]);
        let base = vec![Section::real(("A", "Alpha"), ("B", "Beta"), 11.0, 10.0)];
        let config = AnalysisConfig { nearest_neighbors: 1, ..AnalysisConfig::default() };

        let network = Network::build(&set, &base, &config);
        let summary = network.summary();
        assert_eq!(summary.stations, 3);
        assert_eq!(summary.located_stations, 2);
        assert_eq!(summary.real_sections, 1);
        // Only B -> A can be inferred; A -> B already exists
        assert_eq!(summary.inferred_sections, 1);
        // C has no coordinates and no sections
        assert_eq!(summary.components, 2);
    }

    #[test]
    fn test_empty_network() {
        let network = Network::from_parts(&IndexMap::new(), &[]);
        let summary = network.summary();
        assert_eq!(summary.stations, 0);
        assert_eq!(summary.components, 0);
        assert!(network.adjacency("ANY").is_empty());
    }
}
