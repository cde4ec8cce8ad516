//! Runtime configuration for network building and analysis.

use crate::constants::{
    DEFAULT_AVG_SPEED_KMPH, DEFAULT_HOP_MINUTES, DEFAULT_NEAREST_NEIGHBORS, MAX_ROUTE_HOPS,
    MIN_TRAVEL_MINUTES,
};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables of the augmentation and occupancy stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many nearest unconnected stations each station is linked to
    pub nearest_neighbors: usize,
    /// Speed used to derive travel times of inferred sections
    pub avg_speed_kmph: f64,
    /// Travel time substituted for a hop the network has no section for
    pub default_hop_minutes: f64,
    /// Floor applied to every section travel time used for occupancy
    pub min_travel_minutes: f64,
    /// Route searches give up after expanding this many hops
    pub max_route_hops: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            nearest_neighbors: DEFAULT_NEAREST_NEIGHBORS,
            avg_speed_kmph: DEFAULT_AVG_SPEED_KMPH,
            default_hop_minutes: DEFAULT_HOP_MINUTES,
            min_travel_minutes: MIN_TRAVEL_MINUTES,
            max_route_hops: MAX_ROUTE_HOPS,
        }
    }
}

/// Locations of the station and section master data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    /// Station list carrying names, platforms and halt times
    pub primary_stations: PathBuf,
    /// Station list carrying coordinates
    pub secondary_stations: PathBuf,
    /// Real directed sections
    pub sections: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sources: DataSources,
    pub analysis: AnalysisConfig,
}

impl EngineConfig {
    /// Parse a configuration from JSON; absent fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this structure.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_json_file(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        Self::from_json_str(&text)
    }
}
