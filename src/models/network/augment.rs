use crate::geometry::haversine_km;
use crate::models::{Section, Station};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Complete `base_sections` with inferred legs to each station's nearest neighbours.
///
/// Every station with coordinates gets directed sections to its `k` nearest
/// coordinate-bearing stations that it is not already connected to in that
/// direction. Candidates are ordered by great-circle distance, then by code,
/// so equidistant stations resolve the same way on every run. Base sections
/// are returned unchanged and first; inferred sections follow in station order.
///
/// Distances are computed pairwise, which is quadratic in the number of
/// located stations. Fine for a few hundred stations.
#[must_use]
pub fn augment_with_nearest_neighbors(
    stations: &IndexMap<String, Station>,
    base_sections: &[Section],
    k: usize,
    avg_speed_kmph: f64,
) -> Vec<Section> {
    let mut connected: HashSet<(String, String)> = base_sections
        .iter()
        .map(|s| (s.from_code.clone(), s.to_code.clone()))
        .collect();
    let mut sections = base_sections.to_vec();

    if k == 0 {
        return sections;
    }

    let located: Vec<(&Station, (f64, f64))> = stations
        .values()
        .filter_map(|station| station.coordinates().map(|coords| (station, coords)))
        .collect();

    for &(station, (lat, lon)) in &located {
        let mut candidates: Vec<(f64, &Station)> = located
            .iter()
            .filter(|(other, _)| other.code != station.code)
            .map(|&(other, (other_lat, other_lon))| {
                (haversine_km(lat, lon, other_lat, other_lon), other)
            })
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.code.cmp(&b.1.code)));

        let mut added = 0;
        for (distance_km, other) in candidates {
            if added == k {
                break;
            }
            let key = (station.code.clone(), other.code.clone());
            if connected.contains(&key) {
                continue;
            }
            sections.push(Section::inferred(station, other, distance_km, avg_speed_kmph));
            connected.insert(key);
            added += 1;
        }
    }

    log::debug!(
        "Augmented {} base sections with {} inferred sections over {} located stations",
        base_sections.len(),
        sections.len() - base_sections.len(),
        located.len()
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LegType;

    fn stations() -> IndexMap<String, Station> {
        [
            Station::new("A", "Alpha").with_coordinates(0.0, 0.0),
            Station::new("B", "Beta").with_coordinates(0.0, 0.1),
            Station::new("C", "Gamma").with_coordinates(0.0, 0.3),
            Station::new("D", "Delta").with_coordinates(0.0, 0.6),
            Station::new("X", "Nowhere"),
        ]
        .into_iter()
        .map(|s| (s.code.clone(), s))
        .collect()
    }

    fn pairs(sections: &[Section]) -> Vec<(&str, &str)> {
        sections.iter().map(Section::key).collect()
    }

    #[test]
    fn test_links_nearest_k() {
        let sections = augment_with_nearest_neighbors(&stations(), &[], 2, 70.0);
        let from_a: Vec<&str> = sections
            .iter()
            .filter(|s| s.from_code == "A")
            .map(|s| s.to_code.as_str())
            .collect();
        assert_eq!(from_a, vec!["B", "C"]);
        assert!(sections.iter().all(|s| s.leg_type == LegType::Inferred));
        // Four located stations, two legs each
        assert_eq!(sections.len(), 8);
    }

    #[test]
    fn test_stations_without_coordinates_are_ignored() {
        let sections = augment_with_nearest_neighbors(&stations(), &[], 3, 70.0);
        assert!(sections.iter().all(|s| s.from_code != "X" && s.to_code != "X"));
    }

    #[test]
    fn test_existing_direction_is_skipped_not_counted() {
        let base = vec![Section::real(("A", "Alpha"), ("B", "Beta"), 11.0, 9.0)];
        let sections = augment_with_nearest_neighbors(&stations(), &base, 1, 70.0);

        assert_eq!(sections[0], base[0]);
        let from_a: Vec<&str> = sections[1..]
            .iter()
            .filter(|s| s.from_code == "A")
            .map(|s| s.to_code.as_str())
            .collect();
        assert_eq!(from_a, vec!["C"]);
    }

    #[test]
    fn test_direction_independence() {
        let base = vec![Section::real(("A", "Alpha"), ("B", "Beta"), 11.0, 9.0)];
        let sections = augment_with_nearest_neighbors(&stations(), &base, 1, 70.0);

        // A -> B is real; B -> A is added on its own as B's nearest
        let reverse = sections
            .iter()
            .find(|s| s.key() == ("B", "A"))
            .expect("reverse leg should be inferred");
        assert_eq!(reverse.leg_type, LegType::Inferred);
    }

    #[test]
    fn test_augmentation_is_idempotent() {
        let set = stations();
        let base = vec![Section::real(("A", "Alpha"), ("C", "Gamma"), 40.0, 30.0)];
        let once = augment_with_nearest_neighbors(&set, &base, 2, 70.0);
        let twice = augment_with_nearest_neighbors(&set, &once, 2, 70.0);

        let mut unique = pairs(&twice);
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), twice.len());
        assert_eq!(&twice[..once.len()], &once[..]);
    }

    #[test]
    fn test_real_edges_kept() {
        let base = vec![Section::real(("D", "Delta"), ("A", "Alpha"), 70.0, 55.0)];
        let sections = augment_with_nearest_neighbors(&stations(), &base, 3, 70.0);
        let real: Vec<_> = sections.iter().filter(|s| s.leg_type == LegType::Real).collect();
        assert_eq!(real.len(), 1);
        assert_eq!(real[0].travel_min, 55.0);
    }

    #[test]
    fn test_equidistant_ties_break_by_code() {
        let set: IndexMap<String, Station> = [
            Station::new("M", "Middle").with_coordinates(0.0, 0.0),
            Station::new("Z", "East").with_coordinates(0.0, 0.2),
            Station::new("Y", "West").with_coordinates(0.0, -0.2),
        ]
        .into_iter()
        .map(|s| (s.code.clone(), s))
        .collect();

        let sections = augment_with_nearest_neighbors(&set, &[], 1, 70.0);
        let from_m = sections
            .iter()
            .find(|s| s.from_code == "M")
            .expect("M should get a leg");
        assert_eq!(from_m.to_code, "Y");
    }

    #[test]
    fn test_inferred_travel_time() {
        let sections = augment_with_nearest_neighbors(&stations(), &[], 1, 60.0);
        let leg = sections.iter().find(|s| s.key() == ("A", "B")).expect("A -> B leg");
        assert!((leg.travel_min - leg.distance_km).abs() < 1e-9);
    }
}
