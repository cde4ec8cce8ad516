//! Dispatcher-facing summaries derived from conflicts and decisions.

use crate::conflict::Conflict;
use crate::precedence::{Decisions, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence when one of the two trains is known to proceed
const CONFIDENCE_RESOLVED: u8 = 80;
/// Confidence when both trains end up held by other conflicts
const CONFIDENCE_UNRESOLVED: u8 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub description: String,
    pub impact: String,
    pub confidence: u8,
}

/// One conflict with the verdicts of both trains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub block: String,
    pub trains: [String; 2],
    pub window_min: f64,
    pub decision: BTreeMap<String, Verdict>,
}

/// Train of the conflict that goes first, if either is cleared to proceed
fn proceeding_train<'a>(conflict: &'a Conflict, decisions: &Decisions) -> Option<&'a str> {
    [conflict.train_a.as_str(), conflict.train_b.as_str()]
        .into_iter()
        .find(|id| decisions.verdict(id) == Verdict::Proceed)
}

/// One recommendation per conflict, in conflict order
#[must_use]
pub fn recommend(conflicts: &[Conflict], decisions: &Decisions) -> Vec<Recommendation> {
    conflicts
        .iter()
        .map(|conflict| {
            let winner = proceeding_train(conflict, decisions);
            Recommendation {
                id: format!(
                    "{}:{}:{}:{:.1}",
                    conflict.block_id, conflict.train_a, conflict.train_b, conflict.window.0
                ),
                description: format!(
                    "Resolve block contention on {}: let {} proceed, hold the other",
                    conflict.block_id,
                    winner.unwrap_or(&conflict.train_a)
                ),
                impact: format!("-{:.0} min potential delay", conflict.overlap_minutes().max(0.0)),
                confidence: if winner.is_some() { CONFIDENCE_RESOLVED } else { CONFIDENCE_UNRESOLVED },
            }
        })
        .collect()
}

#[must_use]
pub fn summarize_conflicts(conflicts: &[Conflict], decisions: &Decisions) -> Vec<ConflictSummary> {
    conflicts
        .iter()
        .map(|conflict| ConflictSummary {
            block: conflict.block_id.to_string(),
            trains: [conflict.train_a.clone(), conflict.train_b.clone()],
            window_min: (conflict.overlap_minutes() * 10.0).round() / 10.0,
            decision: [&conflict.train_a, &conflict.train_b]
                .into_iter()
                .map(|id| (id.clone(), decisions.verdict(id)))
                .collect(),
        })
        .collect()
}

/// One line per conflict in detection order, `t+` relative to train start
#[must_use]
pub fn event_log(conflicts: &[Conflict]) -> Vec<String> {
    conflicts.iter().map(Conflict::format_message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockId;
    use crate::precedence::{Ruling, RulingReason};

    fn conflict(a: &str, b: &str, window: (f64, f64)) -> Conflict {
        Conflict {
            block_id: BlockId::between("X", "Y"),
            train_a: a.to_string(),
            train_b: b.to_string(),
            window,
        }
    }

    fn decisions(entries: &[(&str, Verdict)]) -> Decisions {
        Decisions {
            verdicts: entries.iter().map(|(id, v)| ((*id).to_string(), *v)).collect(),
            rulings: vec![Ruling {
                winner: "A".to_string(),
                loser: "B".to_string(),
                reason: RulingReason::Priority,
            }],
        }
    }

    #[test]
    fn test_recommendation_names_proceeding_train() {
        let conflicts = vec![conflict("B", "A", (5.0, 10.0))];
        let decided = decisions(&[("A", Verdict::Proceed), ("B", Verdict::Hold)]);
        let recs = recommend(&conflicts, &decided);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "X-Y:B:A:5.0");
        assert_eq!(recs[0].description, "Resolve block contention on X-Y: let A proceed, hold the other");
        assert_eq!(recs[0].impact, "-5 min potential delay");
        assert_eq!(recs[0].confidence, 80);
    }

    #[test]
    fn test_recommendation_when_both_held() {
        let conflicts = vec![conflict("B", "C", (2.0, 3.5))];
        let decided = decisions(&[("B", Verdict::Hold), ("C", Verdict::Hold)]);
        let recs = recommend(&conflicts, &decided);

        assert_eq!(recs[0].description, "Resolve block contention on X-Y: let B proceed, hold the other");
        assert_eq!(recs[0].confidence, 60);
    }

    #[test]
    fn test_event_log() {
        let log = event_log(&[conflict("A", "B", (12.0, 20.0))]);
        assert_eq!(log, vec!["A and B both occupy X-Y from t+12.0 to t+20.0".to_string()]);
    }

    #[test]
    fn test_summary_rounds_window() {
        let decided = decisions(&[("A", Verdict::Proceed), ("B", Verdict::Hold)]);
        let summary = summarize_conflicts(&[conflict("A", "B", (1.0, 4.333))], &decided);

        assert_eq!(summary[0].window_min, 3.3);
        assert_eq!(summary[0].decision["B"], Verdict::Hold);
        assert_eq!(summary[0].trains, ["A".to_string(), "B".to_string()]);
    }
}
