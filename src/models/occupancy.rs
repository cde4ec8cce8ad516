use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single-occupancy track segment, derived from its ordered endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Block running from `from` to `to`; `A-B` and `B-A` are distinct blocks
    #[must_use]
    pub fn between(from: &str, to: &str) -> Self {
        Self(format!("{from}-{to}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A train's claimed interval on a block, in minutes from the train's own origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockOccupancy {
    pub block_id: BlockId,
    pub start_time: f64,
    pub end_time: f64,
}

impl BlockOccupancy {
    /// # Errors
    ///
    /// Returns an error unless `0 <= start_time <= end_time` and both are finite.
    pub fn new(block_id: BlockId, start_time: f64, end_time: f64) -> Result<Self, EngineError> {
        if !start_time.is_finite() || !end_time.is_finite() || start_time < 0.0 || end_time < start_time {
            return Err(EngineError::InvalidOccupancy {
                block_id: block_id.to_string(),
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self { block_id, start_time, end_time })
    }
}

/// Strict overlap of two half-open windows.
///
/// Intervals that merely touch (`[0, 10)` and `[10, 20)`) do not overlap.
#[must_use]
pub fn overlap_window(a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let start = a.0.max(b.0);
    let end = a.1.min(b.1);
    (start < end).then_some((start, end))
}
