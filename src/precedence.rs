//! Proceed/hold arbitration between conflicting trains.

use crate::models::Train;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Outcome for one train. `Hold` orders below `Proceed`, so the overall
/// verdict of a train is the minimum of its pairwise outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Hold,
    Proceed,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hold => write!(f, "HOLD"),
            Self::Proceed => write!(f, "PROCEED"),
        }
    }
}

/// Which comparison settled a pairwise ruling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulingReason {
    Priority, // Higher priority
    Delay,    // Same priority, more delay
    TrainId,  // Full tie, lexicographically smaller id
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruling {
    pub winner: String,
    pub loser: String,
    pub reason: RulingReason,
}

impl Ruling {
    #[must_use]
    pub fn involves(&self, train_id: &str) -> bool {
        self.winner == train_id || self.loser == train_id
    }

    /// One-line justification a dispatcher can read back
    #[must_use]
    pub fn explain(&self) -> String {
        let why = match self.reason {
            RulingReason::Priority => "higher priority",
            RulingReason::Delay => "equal priority, more delay",
            RulingReason::TrainId => "full tie, smaller train id",
        };
        format!("{} proceeds before {} ({why})", self.winner, self.loser)
    }
}

/// Verdicts for every train in at least one arbitrated pair, plus the rulings behind them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decisions {
    pub verdicts: BTreeMap<String, Verdict>,
    pub rulings: Vec<Ruling>,
}

impl Decisions {
    /// Verdict for `train_id`; trains never in conflict proceed
    #[must_use]
    pub fn verdict(&self, train_id: &str) -> Verdict {
        self.verdicts.get(train_id).copied().unwrap_or(Verdict::Proceed)
    }

    #[must_use]
    pub fn held(&self) -> Vec<&str> {
        self.verdicts
            .iter()
            .filter(|(_, verdict)| **verdict == Verdict::Hold)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Ruling for the unordered pair `(a, b)`
    #[must_use]
    pub fn ruling(&self, a: &str, b: &str) -> Option<&Ruling> {
        self.rulings.iter().find(|r| r.involves(a) && r.involves(b))
    }
}

/// Decide which of two conflicting trains goes first.
///
/// Higher priority wins, then more accumulated delay, then the
/// lexicographically smaller train id.
#[must_use]
pub fn arbitrate(a: &Train, b: &Train) -> Ruling {
    let (winner, loser, reason) = match a.priority.cmp(&b.priority) {
        Ordering::Greater => (a, b, RulingReason::Priority),
        Ordering::Less => (b, a, RulingReason::Priority),
        Ordering::Equal => match a
            .delay_minutes
            .partial_cmp(&b.delay_minutes)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Greater => (a, b, RulingReason::Delay),
            Ordering::Less => (b, a, RulingReason::Delay),
            Ordering::Equal if a.train_id <= b.train_id => (a, b, RulingReason::TrainId),
            Ordering::Equal => (b, a, RulingReason::TrainId),
        },
    };

    Ruling {
        winner: winner.train_id.clone(),
        loser: loser.train_id.clone(),
        reason,
    }
}

/// Resolve each unordered conflicting pair once and combine the outcomes.
///
/// A train held in any pair is held overall. Pairs naming a train missing
/// from `trains_by_id`, and pairs of a train with itself, are skipped.
#[must_use]
pub fn decide_precedence(pairs: &[(String, String)], trains_by_id: &HashMap<&str, &Train>) -> Decisions {
    let mut decisions = Decisions::default();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for (a, b) in pairs {
        if a == b {
            continue;
        }
        let key = if a <= b { (a.as_str(), b.as_str()) } else { (b.as_str(), a.as_str()) };
        if !seen.insert(key) {
            continue;
        }
        let (Some(first), Some(second)) = (trains_by_id.get(key.0), trains_by_id.get(key.1)) else {
            log::warn!("Skipping conflict between {} and {}: unknown train", key.0, key.1);
            continue;
        };

        let ruling = arbitrate(first, second);
        for (train_id, outcome) in [(&ruling.winner, Verdict::Proceed), (&ruling.loser, Verdict::Hold)] {
            let verdict = decisions
                .verdicts
                .entry(train_id.clone())
                .or_insert(Verdict::Proceed);
            *verdict = (*verdict).min(outcome);
        }
        log::debug!("{}", ruling.explain());
        decisions.rulings.push(ruling);
    }

    decisions
}

/// Borrowing id index over `trains`
#[must_use]
pub fn index_by_id(trains: &[Train]) -> HashMap<&str, &Train> {
    trains.iter().map(|t| (t.train_id.as_str(), t)).collect()
}
