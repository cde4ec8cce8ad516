//! End-to-end scenario analysis: routes, occupancies, conflicts, decisions.

use crate::config::AnalysisConfig;
use crate::conflict::{conflicting_pairs, detect_conflicts, Conflict};
use crate::error::EngineError;
use crate::journey::{build_occupancies, resolve_route};
use crate::logging::timed;
use crate::models::{NameGraph, Network, NetworkSummary, PriorityLevel, Train};
use crate::precedence::{decide_precedence, index_by_id, Decisions};
use crate::report::{event_log, recommend, summarize_conflicts, ConflictSummary, Recommendation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_train_type() -> String {
    "Passenger".to_string()
}

/// A train as requested by a caller, addressed by station names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTrain {
    pub train_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_train_type")]
    pub train_type: String,
    #[serde(default)]
    pub priority_level: PriorityLevel,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub delay_minutes: f64,
}

impl ScenarioTrain {
    #[must_use]
    pub fn new(train_id: &str, priority_level: PriorityLevel, source: &str, destination: &str) -> Self {
        Self {
            train_id: train_id.to_string(),
            name: None,
            train_type: default_train_type(),
            priority_level,
            source: source.to_string(),
            destination: destination.to_string(),
            delay_minutes: 0.0,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay_minutes: f64) -> Self {
        self.delay_minutes = delay_minutes;
        self
    }

    /// Resolve the route and occupancy trace of this train.
    ///
    /// # Errors
    ///
    /// Returns an error if no route of at least two stations joins source
    /// and destination, or the resulting train fails validation.
    pub fn plan(&self, names: &NameGraph, config: &AnalysisConfig) -> Result<Train, EngineError> {
        let route = resolve_route(names, &self.source, &self.destination, config.max_route_hops)
            .ok_or_else(|| EngineError::NoRoute {
                train_id: self.train_id.clone(),
                source_station: self.source.clone(),
                destination: self.destination.clone(),
            })?;
        let occupancies = build_occupancies(&route, names, config.default_hop_minutes)?;

        Train::new(
            self.train_id.clone(),
            &self.train_type,
            self.priority_level.priority(),
            route,
            occupancies,
            self.delay_minutes,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub trains: Vec<ScenarioTrain>,
}

impl ScenarioRequest {
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario document.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A requested train that could not be analysed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedTrain {
    pub train_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub network: NetworkSummary,
    pub trains: Vec<Train>,
    pub excluded_trains: Vec<ExcludedTrain>,
    pub conflicts: Vec<Conflict>,
    pub decisions: Decisions,
    pub recommendations: Vec<Recommendation>,
    pub conflicts_and_decisions: Vec<ConflictSummary>,
    pub event_log: Vec<String>,
    /// Free-text summary from an external model; never produced here
    pub model_summary: Option<String>,
}

/// Run the full pipeline for `request` over a built network.
///
/// Trains that cannot be routed, or repeat an id already planned, are
/// listed in `excluded_trains` and do not affect the rest of the batch.
#[must_use]
pub fn analyze_scenario(
    network: &Network,
    request: &ScenarioRequest,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let names = network.name_graph(config.min_travel_minutes);

    let mut trains = Vec::with_capacity(request.trains.len());
    let mut excluded_trains = Vec::new();
    let mut planned_ids = HashSet::new();

    for requested in &request.trains {
        let planned = if planned_ids.contains(requested.train_id.as_str()) {
            Err(EngineError::invalid_train(&requested.train_id, "duplicate train id"))
        } else {
            requested.plan(&names, config)
        };

        match planned {
            Ok(train) => {
                planned_ids.insert(requested.train_id.as_str());
                trains.push(train);
            }
            Err(e) => {
                log::warn!("Excluding train {}: {e}", requested.train_id);
                excluded_trains.push(ExcludedTrain {
                    train_id: requested.train_id.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let conflicts = timed("conflict detection", || detect_conflicts(&trains));
    let decisions = timed("precedence", || {
        decide_precedence(&conflicting_pairs(&conflicts), &index_by_id(&trains))
    });

    log::info!(
        "Analysed {} trains ({} excluded): {} conflicts, {} held",
        trains.len(),
        excluded_trains.len(),
        conflicts.len(),
        decisions.held().len()
    );

    AnalysisReport {
        network: network.summary(),
        recommendations: recommend(&conflicts, &decisions),
        conflicts_and_decisions: summarize_conflicts(&conflicts, &decisions),
        event_log: event_log(&conflicts),
        model_summary: None,
        trains,
        excluded_trains,
        conflicts,
        decisions,
    }
}
