use crate::models::Section;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed station graph keyed by station name, as callers address stations.
///
/// When several sections join the same ordered name pair, the first one
/// supplies the travel time. Real sections precede inferred ones in a built
/// network, so they win.
#[derive(Debug, Clone, Default)]
pub struct NameGraph {
    neighbors: IndexMap<String, Vec<String>>,
    travel: HashMap<(String, String), f64>,
}

impl NameGraph {
    /// Travel times are raised to at least `min_travel_minutes`
    pub fn from_sections<'a>(
        sections: impl IntoIterator<Item = &'a Section>,
        min_travel_minutes: f64,
    ) -> Self {
        let mut graph = Self::default();
        for section in sections {
            if section.from_name.is_empty() || section.to_name.is_empty() {
                continue;
            }
            let key = (section.from_name.clone(), section.to_name.clone());
            if graph.travel.contains_key(&key) {
                continue;
            }
            graph
                .neighbors
                .entry(section.from_name.clone())
                .or_default()
                .push(section.to_name.clone());
            graph
                .travel
                .insert(key, section.normalized_travel_min(min_travel_minutes));
        }
        graph
    }

    /// Whether `name` has outgoing sections
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.neighbors.contains_key(name)
    }

    #[must_use]
    pub fn neighbors(&self, name: &str) -> &[String] {
        self.neighbors.get(name).map_or(&[], Vec::as_slice)
    }

    /// Travel time from `from` to `to` when a section joins them directly
    #[must_use]
    pub fn travel_time(&self, from: &str, to: &str) -> Option<f64> {
        self.travel.get(&(from.to_string(), to.to_string())).copied()
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.travel.len()
    }

    /// Fewest-hop route from `start` to `end`, both endpoints included.
    ///
    /// Returns `None` when `start` has no outgoing sections, `end` is
    /// unreachable, or every route needs more than `max_hops` hops.
    /// Neighbours are expanded in section order, so equal-length routes
    /// resolve the same way on every run.
    #[must_use]
    pub fn shortest_path(&self, start: &str, end: &str, max_hops: usize) -> Option<Vec<String>> {
        if !self.contains(start) {
            return None;
        }

        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(start, 0)]);

        while let Some((node, hops)) = queue.pop_front() {
            if node == end {
                let mut path = vec![node.to_string()];
                let mut current = node;
                while let Some(&previous) = parent.get(current) {
                    path.push(previous.to_string());
                    current = previous;
                }
                path.reverse();
                return Some(path);
            }
            if hops >= max_hops {
                continue;
            }
            for next in self.neighbors(node) {
                let next = next.as_str();
                if visited.insert(next) {
                    parent.insert(next, node);
                    queue.push_back((next, hops + 1));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(from: &str, to: &str, travel: f64) -> Section {
        Section::real((from, from), (to, to), 1.0, travel)
    }

    fn line() -> NameGraph {
        NameGraph::from_sections(
            &[
                leg("A", "B", 10.0),
                leg("B", "C", 10.0),
                leg("C", "D", 10.0),
                leg("A", "X", 3.0),
                leg("X", "D", 3.0),
            ],
            1.0,
        )
    }

    #[test]
    fn test_shortest_path_by_hops() {
        let path = line().shortest_path("A", "D", 16).expect("route should exist");
        assert_eq!(path, vec!["A", "X", "D"]);
    }

    #[test]
    fn test_shortest_path_respects_direction() {
        assert!(line().shortest_path("D", "A", 16).is_none());
    }

    #[test]
    fn test_unknown_start() {
        assert!(line().shortest_path("Nowhere", "D", 16).is_none());
    }

    #[test]
    fn test_hop_limit() {
        assert!(line().shortest_path("A", "D", 1).is_none());
        assert!(line().shortest_path("A", "D", 2).is_some());
    }

    #[test]
    fn test_same_start_and_end() {
        assert_eq!(line().shortest_path("A", "A", 16), Some(vec!["A".to_string()]));
    }

    #[test]
    fn test_first_section_wins_and_travel_is_floored() {
        let graph = NameGraph::from_sections(&[leg("A", "B", 0.2), leg("A", "B", 9.0)], 1.0);
        assert_eq!(graph.travel_time("A", "B"), Some(1.0));
        assert_eq!(graph.neighbors("A"), ["B".to_string()]);
        assert_eq!(graph.section_count(), 1);
        assert!(graph.neighbors("B").is_empty());
    }
}
