use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub code: String,
    pub name: String,
    pub platform_count: u32,
    /// Dwell time at this station in minutes
    pub halt_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl Station {
    /// Create a station without coordinates; an empty name falls back to the code
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let name = name.into();
        let name = if name.is_empty() { code.clone() } else { name };
        Self {
            code,
            name,
            platform_count: 0,
            halt_min: 0.0,
            lat: None,
            lon: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    #[must_use]
    pub fn with_platforms(mut self, platform_count: u32) -> Self {
        self.platform_count = platform_count;
        self
    }

    /// Negative halt times are clamped to zero
    #[must_use]
    pub fn with_halt(mut self, halt_min: f64) -> Self {
        self.halt_min = halt_min.max(0.0);
        self
    }

    /// `(lat, lon)` when both are known
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    /// Fill gaps in this station from `fallback`.
    ///
    /// Fields of `self` win whenever they are non-empty / non-zero; coordinates
    /// are taken as a pair so a half-known position is never mixed with another
    /// source.
    #[must_use]
    pub fn merged_with(&self, fallback: &Station) -> Station {
        let (lat, lon) = match self.coordinates().or_else(|| fallback.coordinates()) {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };

        Station {
            code: self.code.clone(),
            name: if self.name.is_empty() { fallback.name.clone() } else { self.name.clone() },
            platform_count: if self.platform_count > 0 { self.platform_count } else { fallback.platform_count },
            halt_min: if self.halt_min > 0.0 { self.halt_min } else { fallback.halt_min },
            lat,
            lon,
        }
    }
}

/// Union of two station sets keyed by code.
///
/// Codes from `primary` come first, in their original order, followed by the
/// codes only `secondary` knows about. For a code present in both, `primary`
/// is preferred field by field and `secondary` fills the gaps (typically the
/// coordinates).
#[must_use]
pub fn merge_station_sets(
    primary: &IndexMap<String, Station>,
    secondary: &IndexMap<String, Station>,
) -> IndexMap<String, Station> {
    let mut merged: IndexMap<String, Station> = primary
        .iter()
        .map(|(code, station)| {
            let station = match secondary.get(code) {
                Some(other) => station.merged_with(other),
                None => station.clone(),
            };
            (code.clone(), station)
        })
        .collect();

    for (code, station) in secondary {
        if !merged.contains_key(code) {
            merged.insert(code.clone(), station.clone());
        }
    }

    merged
}
