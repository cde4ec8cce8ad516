use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed csv in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid train {train_id}: {reason}")]
    InvalidTrain { train_id: String, reason: String },
    #[error("invalid occupancy on block {block_id}: start {start} end {end}")]
    InvalidOccupancy { block_id: String, start: f64, end: f64 },
    #[error("unknown priority level: {0}")]
    UnknownPriority(String),
    #[error("no route for {train_id} from {source_station} to {destination}")]
    NoRoute {
        train_id: String,
        source_station: String,
        destination: String,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }

    pub(crate) fn invalid_train(train_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTrain {
            train_id: train_id.to_string(),
            reason: reason.into(),
        }
    }
}
