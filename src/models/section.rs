use crate::geometry::travel_minutes;
use crate::models::Station;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegType {
    Real,     // From authoritative section data
    Inferred, // Added by nearest-neighbour augmentation
}

impl LegType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Inferred => "inferred",
        }
    }
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, timed edge between two stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub from_code: String,
    pub from_name: String,
    pub to_code: String,
    pub to_name: String,
    pub distance_km: f64,
    pub travel_min: f64,
    pub leg_type: LegType,
}

impl Section {
    #[must_use]
    pub fn real(
        from: (&str, &str),
        to: (&str, &str),
        distance_km: f64,
        travel_min: f64,
    ) -> Self {
        let name_or_code = |(code, name): (&str, &str)| {
            if name.is_empty() { code.to_string() } else { name.to_string() }
        };
        Self {
            from_code: from.0.to_string(),
            from_name: name_or_code(from),
            to_code: to.0.to_string(),
            to_name: name_or_code(to),
            distance_km: distance_km.max(0.0),
            travel_min,
            leg_type: LegType::Real,
        }
    }

    /// Inferred leg between two stations `distance_km` apart
    #[must_use]
    pub fn inferred(from: &Station, to: &Station, distance_km: f64, avg_speed_kmph: f64) -> Self {
        Self {
            from_code: from.code.clone(),
            from_name: from.name.clone(),
            to_code: to.code.clone(),
            to_name: to.name.clone(),
            distance_km,
            travel_min: travel_minutes(distance_km, avg_speed_kmph),
            leg_type: LegType::Inferred,
        }
    }

    /// Ordered `(from_code, to_code)` pair identifying this section
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.from_code, &self.to_code)
    }

    /// Sections with a missing endpoint or identical endpoints are unusable
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.from_code.is_empty() || self.to_code.is_empty() || self.from_code == self.to_code
    }

    /// Travel time raised to at least `floor` minutes
    #[must_use]
    pub fn normalized_travel_min(&self, floor: f64) -> f64 {
        self.travel_min.max(floor)
    }
}
