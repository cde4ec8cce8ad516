#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rail_precedence::config::EngineConfig;
use rail_precedence::constants::DEFAULT_START_TIME;
use rail_precedence::export::{write_augmented_sections, write_master_stations, write_schedule};
use rail_precedence::generate::generate_schedule;
use rail_precedence::import::{load_sections, merge_stations};
use rail_precedence::models::{Network, PriorityLevel, Sections, Stations};
use rail_precedence::time::parse_start_time;
use rail_precedence::timetable::UserTrainRequest;
use rail_precedence::{analyze_scenario, logging, ScenarioRequest};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Train precedence and conflict analysis over a rail network", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
    #[command(subcommand)]
    cmd: Command,
}

/// Where master data and tunables come from; flags override the config file
#[derive(Args, Debug)]
struct DataArgs {
    /// JSON engine configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Station list with names, platforms and halt times
    #[arg(long, global = true)]
    primary_stations: Option<PathBuf>,
    /// Station list with coordinates
    #[arg(long, global = true)]
    secondary_stations: Option<PathBuf>,
    /// Real directed sections
    #[arg(long, global = true)]
    sections: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the augmented network and print its summary
    Network {
        /// Write the merged station list here
        #[arg(long)]
        stations_out: Option<PathBuf>,
        /// Write real and inferred sections here
        #[arg(long)]
        sections_out: Option<PathBuf>,
    },
    /// Generate a seeded random schedule
    Generate {
        #[arg(short = 'n', long, default_value_t = 20)]
        trains: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// First departure, e.g. 2025-09-19T08:00:00
        #[arg(long)]
        start: Option<String>,
        #[arg(short, long, default_value = "schedule.csv")]
        out: PathBuf,
    },
    /// Detect conflicts and decide precedence for a JSON scenario
    Analyze {
        /// Scenario document: {"trains": [...]}
        scenario: PathBuf,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Lay out the timetable of one train along a chain of station codes
    AddTrain {
        /// Station codes in running order
        #[arg(required = true, num_args = 2..)]
        stations: Vec<String>,
        #[arg(long)]
        train_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "Passenger")]
        train_type: String,
        #[arg(long, default_value = "Medium")]
        priority: String,
        /// First departure, e.g. 2025-09-19T08:00:00
        #[arg(long)]
        start: Option<String>,
        /// Write the timetable as CSV here instead of JSON on stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

impl DataArgs {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(path) = &self.primary_stations {
            config.sources.primary_stations.clone_from(path);
        }
        if let Some(path) = &self.secondary_stations {
            config.sources.secondary_stations.clone_from(path);
        }
        if let Some(path) = &self.sections {
            config.sources.sections.clone_from(path);
        }
        Ok(config)
    }
}

fn build_network(config: &EngineConfig) -> Network {
    let sources = &config.sources;
    let stations = merge_stations(&sources.primary_stations, &sources.secondary_stations);
    let sections = load_sections(&sources.sections);
    Network::build(&stations, &sections, &config.analysis)
}

fn start_time(start: Option<&str>) -> anyhow::Result<chrono::NaiveDateTime> {
    match start {
        Some(s) => parse_start_time(s).with_context(|| format!("Invalid start time {s:?}")),
        None => Ok(DEFAULT_START_TIME),
    }
}

fn emit_json<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.data.engine_config()?;

    match cli.cmd {
        Command::Network { stations_out, sections_out } => {
            let network = build_network(&config);
            if let Some(path) = stations_out {
                write_master_stations(&path, network.stations())?;
            }
            if let Some(path) = sections_out {
                write_augmented_sections(&path, network.sections())?;
            }
            emit_json(&network.summary(), None)?;
        }
        Command::Generate { trains, seed, start, out } => {
            let start = start_time(start.as_deref())?;
            let network = build_network(&config);
            let schedule = generate_schedule(&network, trains, start, seed);
            write_schedule(&out, &schedule)?;
        }
        Command::Analyze { scenario, out } => {
            let text = std::fs::read_to_string(&scenario)
                .with_context(|| format!("Failed to read scenario {}", scenario.display()))?;
            let request = ScenarioRequest::from_json_str(&text)
                .with_context(|| format!("Invalid scenario {}", scenario.display()))?;
            let network = build_network(&config);
            let report = analyze_scenario(&network, &request, &config.analysis);
            emit_json(&report, out.as_deref())?;
        }
        Command::AddTrain {
            stations,
            train_id,
            name,
            train_type,
            priority,
            start,
            out,
        } => {
            let priority_level: PriorityLevel = priority.parse()?;
            let request = UserTrainRequest {
                train_id,
                train_name: name,
                train_type,
                priority_level,
                stations,
                start_time: start_time(start.as_deref())?,
            };
            let network = build_network(&config);
            let stops = request.timetable(&network, config.analysis.avg_speed_kmph)?;
            match out {
                Some(path) => write_schedule(&path, &stops)?,
                None => emit_json(&stops, None)?,
            }
        }
    }

    Ok(())
}
