use petgraph::graph::NodeIndex;
use super::Network;
use crate::models::Station;

/// Extension trait for station-related operations on `Network`
pub trait Stations {
    /// Add a station keyed by code; an already known code keeps its first station
    fn add_station(&mut self, station: Station) -> NodeIndex;

    /// Get a station by code
    fn station(&self, code: &str) -> Option<&Station>;

    /// Get `NodeIndex` by station code
    fn station_index(&self, code: &str) -> Option<NodeIndex>;

    /// All stations in insertion order
    fn stations(&self) -> Vec<&Station>;

    /// Stations with known coordinates, in insertion order
    fn located_stations(&self) -> Vec<&Station>;
}

impl Stations for Network {
    fn add_station(&mut self, station: Station) -> NodeIndex {
        if let Some(&index) = self.station_code_to_index.get(&station.code) {
            index
        } else {
            let code = station.code.clone();
            let index = self.graph.add_node(station);
            self.station_code_to_index.insert(code, index);
            index
        }
    }

    fn station(&self, code: &str) -> Option<&Station> {
        self.station_index(code).and_then(|index| self.graph.node_weight(index))
    }

    fn station_index(&self, code: &str) -> Option<NodeIndex> {
        self.station_code_to_index.get(code).copied()
    }

    fn stations(&self) -> Vec<&Station> {
        self.graph.node_weights().collect()
    }

    fn located_stations(&self) -> Vec<&Station> {
        self.graph
            .node_weights()
            .filter(|station| station.coordinates().is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_station_is_idempotent() {
        let mut network = Network::new();
        let first = network.add_station(Station::new("A", "Alpha"));
        let second = network.add_station(Station::new("A", "Renamed"));

        assert_eq!(first, second);
        assert_eq!(network.graph.node_count(), 1);
        assert_eq!(network.station("A").map(|s| s.name.as_str()), Some("Alpha"));
    }

    #[test]
    fn test_unknown_station() {
        let network = Network::new();
        assert!(network.station("NOPE").is_none());
        assert!(network.station_index("NOPE").is_none());
    }

    #[test]
    fn test_located_stations() {
        let mut network = Network::new();
        network.add_station(Station::new("A", "Alpha").with_coordinates(1.0, 1.0));
        network.add_station(Station::new("B", "Beta"));
        network.add_station(Station::new("C", "Gamma").with_coordinates(2.0, 2.0));

        let codes: Vec<&str> = network.located_stations().iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert_eq!(network.stations().len(), 3);
    }
}
