//! Core types for conflict detection.

use crate::models::BlockId;
use serde::{Deserialize, Serialize};

/// Two distinct trains claiming the same block during overlapping windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub block_id: BlockId,
    pub train_a: String,
    pub train_b: String,
    /// Overlap of the two claims, `start < end`
    pub window: (f64, f64),
}

impl Conflict {
    /// The two train ids in lexicographic order, for deduplicating relationships
    #[must_use]
    pub fn pair(&self) -> (&str, &str) {
        if self.train_a <= self.train_b {
            (&self.train_a, &self.train_b)
        } else {
            (&self.train_b, &self.train_a)
        }
    }

    #[must_use]
    pub fn overlap_minutes(&self) -> f64 {
        self.window.1 - self.window.0
    }

    /// Format a human-readable message describing the conflict
    #[must_use]
    pub fn format_message(&self) -> String {
        format!(
            "{} and {} both occupy {} from t+{:.1} to t+{:.1}",
            self.train_a, self.train_b, self.block_id, self.window.0, self.window.1
        )
    }
}
