mod block;
mod types;

pub use types::Conflict;

use crate::models::Train;
use std::collections::HashSet;

/// Find every pair of distinct trains whose claims on a block overlap.
///
/// Overlap is strict: windows that only touch at an instant do not
/// conflict. Output order is reproducible for identical input: blocks in
/// order of first appearance across `trains`, then occupant pairs in train
/// order.
#[must_use]
pub fn detect_conflicts(trains: &[Train]) -> Vec<Conflict> {
    let index = block::index_occupants(trains);

    let mut conflicts = Vec::new();
    let mut contended = 0usize;
    for (block_id, occupants) in &index {
        if occupants.len() < 2 {
            continue;
        }
        contended += 1;
        block::collect_block_conflicts(block_id, occupants, &mut conflicts);
    }

    log::debug!(
        "Found {} conflicts on {} contended of {} blocks for {} trains",
        conflicts.len(),
        contended,
        index.len(),
        trains.len()
    );

    conflicts
}

/// Unordered train pairs in conflict, each listed once in order of first conflict
#[must_use]
pub fn conflicting_pairs(conflicts: &[Conflict]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    conflicts
        .iter()
        .map(Conflict::pair)
        .filter(|pair| seen.insert(*pair))
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockId, BlockOccupancy};

    fn train(id: &str, priority: i32, legs: &[(&str, &str, f64, f64)]) -> Train {
        let mut path = Vec::new();
        let mut occupancies = Vec::new();
        for (from, to, start, end) in legs {
            if path.is_empty() {
                path.push((*from).to_string());
            }
            path.push((*to).to_string());
            occupancies.push(
                BlockOccupancy::new(BlockId::between(from, to), *start, *end).expect("valid occupancy"),
            );
        }
        Train::new(id, "passenger", priority, path, occupancies, 0.0).expect("valid train")
    }

    #[test]
    fn test_detect_conflicts_empty() {
        assert!(detect_conflicts(&[]).is_empty());
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        let trains = vec![
            train("A", 5, &[("X", "Y", 0.0, 10.0)]),
            train("B", 1, &[("X", "Y", 5.0, 15.0)]),
        ];
        let conflicts = detect_conflicts(&trains);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].block_id.as_str(), "X-Y");
        assert_eq!(conflicts[0].pair(), ("A", "B"));
        assert_eq!(conflicts[0].window, (5.0, 10.0));
    }

    #[test]
    fn test_touching_windows_do_not_conflict() {
        let trains = vec![
            train("A", 5, &[("X", "Y", 0.0, 10.0)]),
            train("B", 1, &[("X", "Y", 10.0, 20.0)]),
        ];
        assert!(detect_conflicts(&trains).is_empty());
    }

    #[test]
    fn test_opposite_directions_are_different_blocks() {
        let trains = vec![
            train("A", 5, &[("X", "Y", 0.0, 10.0)]),
            train("B", 1, &[("Y", "X", 0.0, 10.0)]),
        ];
        assert!(detect_conflicts(&trains).is_empty());
    }

    #[test]
    fn test_disjoint_routes() {
        let trains = vec![
            train("A", 5, &[("P", "Q", 0.0, 10.0), ("Q", "R", 10.0, 20.0)]),
            train("B", 1, &[("S", "T", 0.0, 10.0)]),
        ];
        assert!(detect_conflicts(&trains).is_empty());
    }

    #[test]
    fn test_conflicts_are_symmetric() {
        let a = train("A", 3, &[("X", "Y", 0.0, 10.0), ("Y", "Z", 10.0, 20.0)]);
        let b = train("B", 3, &[("W", "Y", 0.0, 12.0), ("Y", "Z", 12.0, 30.0)]);

        let forward = detect_conflicts(&[a.clone(), b.clone()]);
        let backward = detect_conflicts(&[b, a]);

        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].pair(), backward[0].pair());
        assert_eq!(forward[0].window, backward[0].window);
        assert_eq!(forward[0].window, (12.0, 20.0));
    }

    #[test]
    fn test_no_self_conflict() {
        // A loop that revisits the same block
        let looping = train(
            "L",
            3,
            &[("X", "Y", 0.0, 10.0), ("Y", "X", 10.0, 20.0), ("X", "Y", 5.0, 25.0)],
        );
        assert!(detect_conflicts(&[looping]).is_empty());
    }

    #[test]
    fn test_three_way_contention() {
        let trains = vec![
            train("T5", 5, &[("X", "Y", 0.0, 10.0)]),
            train("T3", 3, &[("X", "Y", 2.0, 12.0)]),
            train("T1", 1, &[("X", "Y", 4.0, 14.0)]),
        ];
        let conflicts = detect_conflicts(&trains);

        let pairs: Vec<(&str, &str)> = conflicts.iter().map(|c| (c.train_a.as_str(), c.train_b.as_str())).collect();
        assert_eq!(pairs, vec![("T5", "T3"), ("T5", "T1"), ("T3", "T1")]);
        assert!(conflicts.iter().all(|c| c.train_a != c.train_b));
    }

    #[test]
    fn test_output_order_follows_first_block_appearance() {
        let trains = vec![
            train("A", 3, &[("P", "Q", 0.0, 10.0), ("Q", "R", 10.0, 20.0)]),
            train("B", 3, &[("Q", "R", 10.0, 20.0)]),
            train("C", 3, &[("P", "Q", 0.0, 10.0)]),
        ];
        let conflicts = detect_conflicts(&trains);
        let blocks: Vec<&str> = conflicts.iter().map(|c| c.block_id.as_str()).collect();
        assert_eq!(blocks, vec!["P-Q", "Q-R"]);
        assert_eq!(detect_conflicts(&trains), conflicts);
    }

    #[test]
    fn test_conflicting_pairs_deduplicates() {
        let trains = vec![
            train("B", 3, &[("X", "Y", 0.0, 10.0), ("Y", "Z", 10.0, 20.0)]),
            train("A", 3, &[("X", "Y", 0.0, 10.0), ("Y", "Z", 10.0, 20.0)]),
        ];
        let conflicts = detect_conflicts(&trains);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicting_pairs(&conflicts), vec![("A".to_string(), "B".to_string())]);
    }
}
