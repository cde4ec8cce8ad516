pub mod analysis;
pub mod config;
pub mod conflict;
pub mod constants;
pub mod error;
pub mod export;
pub mod generate;
pub mod geometry;
pub mod import;
pub mod journey;
pub mod logging;
pub mod models;
pub mod precedence;
pub mod report;
pub mod time;
pub mod timetable;

pub use analysis::{analyze_scenario, AnalysisReport, ScenarioRequest, ScenarioTrain};
pub use config::{AnalysisConfig, DataSources, EngineConfig};
pub use error::EngineError;
