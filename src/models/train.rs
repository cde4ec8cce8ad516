use crate::error::EngineError;
use crate::models::BlockOccupancy;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Service priority as requested by a caller.
///
/// Deserialized case-insensitively; an unrecognised level is read as `Low`
/// so one malformed train never invalidates a whole request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PriorityLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 3] = [Self::High, Self::Medium, Self::Low];

    /// Numeric priority used for arbitration; higher is more important
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::High => 5,
            Self::Medium => 3,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl FromStr for PriorityLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(EngineError::UnknownPriority(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PriorityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|e| {
            log::warn!("{e}, treating as Low");
            Self::Low
        }))
    }
}

/// A train under analysis with its resolved route and block occupancies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Train {
    pub train_id: String,
    pub category: String,
    pub priority: i32,
    pub planned_path: Vec<String>,
    pub occupancies: Vec<BlockOccupancy>,
    pub delay_minutes: f64,
}

impl Train {
    /// Build a train, checking the route/occupancy invariants.
    ///
    /// The category is lower-cased.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, the path has fewer than two
    /// stations, the occupancy count does not match the hop count, or the
    /// delay is negative.
    pub fn new(
        train_id: impl Into<String>,
        category: &str,
        priority: i32,
        planned_path: Vec<String>,
        occupancies: Vec<BlockOccupancy>,
        delay_minutes: f64,
    ) -> Result<Self, EngineError> {
        let train_id = train_id.into();
        if train_id.is_empty() {
            return Err(EngineError::invalid_train(&train_id, "empty train id"));
        }
        if planned_path.len() < 2 {
            return Err(EngineError::invalid_train(&train_id, "route needs at least two stations"));
        }
        if occupancies.len() != planned_path.len() - 1 {
            return Err(EngineError::invalid_train(
                &train_id,
                format!(
                    "{} occupancies for {} hops",
                    occupancies.len(),
                    planned_path.len() - 1
                ),
            ));
        }
        if !delay_minutes.is_finite() || delay_minutes < 0.0 {
            return Err(EngineError::invalid_train(&train_id, format!("delay {delay_minutes} is negative")));
        }

        Ok(Self {
            train_id,
            category: category.to_lowercase(),
            priority,
            planned_path,
            occupancies,
            delay_minutes,
        })
    }

    /// Elapsed minutes at which the train clears its last block
    #[must_use]
    pub fn run_time(&self) -> f64 {
        self.occupancies.last().map_or(0.0, |occ| occ.end_time)
    }
}
