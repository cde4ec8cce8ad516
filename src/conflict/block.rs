//! Per-block occupant index and pairwise overlap checks.

use super::types::Conflict;
use crate::models::{overlap_window, BlockId, Train};
use indexmap::IndexMap;

/// One train's claim on a block
#[derive(Debug, Clone, Copy)]
pub(super) struct Occupant<'a> {
    pub train_id: &'a str,
    pub start: f64,
    pub end: f64,
}

/// Occupants per block, blocks in first-seen order, occupants in train then occupancy order
pub(super) fn index_occupants(trains: &[Train]) -> IndexMap<&BlockId, Vec<Occupant<'_>>> {
    let mut index: IndexMap<&BlockId, Vec<Occupant<'_>>> = IndexMap::new();
    for train in trains {
        for occupancy in &train.occupancies {
            index.entry(&occupancy.block_id).or_default().push(Occupant {
                train_id: &train.train_id,
                start: occupancy.start_time,
                end: occupancy.end_time,
            });
        }
    }
    index
}

/// Compare every unordered pair of occupants of one block
pub(super) fn collect_block_conflicts(
    block_id: &BlockId,
    occupants: &[Occupant<'_>],
    conflicts: &mut Vec<Conflict>,
) {
    for (i, first) in occupants.iter().enumerate() {
        for second in &occupants[i + 1..] {
            if first.train_id == second.train_id {
                continue;
            }
            let Some(window) = overlap_window((first.start, first.end), (second.start, second.end)) else {
                continue;
            };
            conflicts.push(Conflict {
                block_id: block_id.clone(),
                train_a: first.train_id.to_string(),
                train_b: second.train_id.to_string(),
                window,
            });
        }
    }
}
