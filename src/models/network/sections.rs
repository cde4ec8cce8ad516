use indexmap::IndexMap;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use super::{Network, Stations};
use crate::models::Section;

/// Outgoing sections per station code, in section order
pub type Adjacency = IndexMap<String, Vec<(String, Section)>>;

/// Group sections by their `from` code
#[must_use]
pub fn build_adjacency(sections: &[Section]) -> Adjacency {
    let mut adjacency = Adjacency::new();
    for section in sections {
        adjacency
            .entry(section.from_code.clone())
            .or_default()
            .push((section.to_code.clone(), section.clone()));
    }
    adjacency
}

/// Extension trait for section-related operations on `Network`
pub trait Sections {
    /// Add a directed section, returns the `EdgeIndex`.
    ///
    /// Returns `None` without changing the network when the section is
    /// degenerate, an endpoint is unknown, or the ordered pair already has a
    /// section.
    fn add_section(&mut self, section: Section) -> Option<EdgeIndex>;

    /// Whether a section runs from `from_code` to `to_code`
    fn has_section(&self, from_code: &str, to_code: &str) -> bool;

    /// Get the section from `from_code` to `to_code`
    fn section(&self, from_code: &str, to_code: &str) -> Option<&Section>;

    /// Outgoing `(neighbour code, section)` pairs in insertion order.
    /// Unknown codes yield an empty list.
    fn adjacency(&self, code: &str) -> Vec<(&str, &Section)>;

    /// All sections in insertion order
    fn sections(&self) -> Vec<&Section>;
}

impl Sections for Network {
    fn add_section(&mut self, section: Section) -> Option<EdgeIndex> {
        if section.is_degenerate() {
            return None;
        }
        let from = self.station_index(&section.from_code)?;
        let to = self.station_index(&section.to_code)?;
        if self.graph.find_edge(from, to).is_some() {
            return None;
        }
        Some(self.graph.add_edge(from, to, section))
    }

    fn has_section(&self, from_code: &str, to_code: &str) -> bool {
        self.section(from_code, to_code).is_some()
    }

    fn section(&self, from_code: &str, to_code: &str) -> Option<&Section> {
        let from = self.station_index(from_code)?;
        let to = self.station_index(to_code)?;
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    fn adjacency(&self, code: &str) -> Vec<(&str, &Section)> {
        let Some(index) = self.station_index(code) else {
            return Vec::new();
        };

        // petgraph walks outgoing edges newest first
        let mut edges: Vec<_> = self.graph.edges(index).collect();
        edges.sort_by_key(|edge| edge.id());

        edges
            .into_iter()
            .map(|edge| (self.graph[edge.target()].code.as_str(), edge.weight()))
            .collect()
    }

    fn sections(&self) -> Vec<&Section> {
        self.graph.edge_weights().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;

    fn network(codes: &[&str]) -> Network {
        let mut network = Network::new();
        for code in codes {
            network.add_station(Station::new(*code, *code));
        }
        network
    }

    fn real(from: &str, to: &str, travel: f64) -> Section {
        Section::real((from, from), (to, to), 1.0, travel)
    }

    #[test]
    fn test_add_section() {
        let mut network = network(&["A", "B"]);
        let edge = network.add_section(real("A", "B", 4.0));

        assert!(edge.is_some());
        assert!(network.has_section("A", "B"));
        assert!(!network.has_section("B", "A"));
    }

    #[test]
    fn test_add_section_is_idempotent_per_ordered_pair() {
        let mut network = network(&["A", "B"]);
        assert!(network.add_section(real("A", "B", 4.0)).is_some());
        assert!(network.add_section(real("A", "B", 9.0)).is_none());
        assert!(network.add_section(real("B", "A", 9.0)).is_some());

        assert_eq!(network.graph.edge_count(), 2);
        assert_eq!(network.section("A", "B").map(|s| s.travel_min), Some(4.0));
    }

    #[test]
    fn test_add_section_unknown_endpoint() {
        let mut network = network(&["A"]);
        assert!(network.add_section(real("A", "Z", 4.0)).is_none());
        assert_eq!(network.graph.edge_count(), 0);
    }

    #[test]
    fn test_adjacency_in_insertion_order() {
        let mut network = network(&["A", "B", "C", "D"]);
        network.add_section(real("A", "C", 1.0));
        network.add_section(real("A", "B", 1.0));
        network.add_section(real("A", "D", 1.0));

        let neighbours: Vec<&str> = network.adjacency("A").iter().map(|(code, _)| *code).collect();
        assert_eq!(neighbours, vec!["C", "B", "D"]);
        assert!(network.adjacency("D").is_empty());
        assert!(network.adjacency("UNKNOWN").is_empty());
    }

    #[test]
    fn test_build_adjacency_groups_by_from() {
        let sections = vec![real("A", "B", 1.0), real("B", "C", 2.0), real("A", "C", 3.0)];
        let adjacency = build_adjacency(&sections);

        assert_eq!(adjacency.len(), 2);
        let from_a: Vec<&str> = adjacency["A"].iter().map(|(to, _)| to.as_str()).collect();
        assert_eq!(from_a, vec!["B", "C"]);
        assert_eq!(adjacency["B"][0].1.travel_min, 2.0);
        assert!(!adjacency.contains_key("C"));
    }
}
