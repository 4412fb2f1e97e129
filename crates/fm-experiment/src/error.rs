use std::path::PathBuf;

use fm_output::OutputError;
use fm_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no config named {name:?} in {}", dir.display())]
    ConfigNotFound { name: String, dir: PathBuf },

    #[error("invalid experiment name {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("output error: {0}")]
    Output(#[from] OutputError),
}

pub type ExperimentResult<T> = Result<T, ExperimentError>;
