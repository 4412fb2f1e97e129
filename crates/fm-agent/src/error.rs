use fm_core::LoadId;
use fm_spatial::SpatialError;
use thiserror::Error;

/// Violations of a single load's state machine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("load {0} is already booked")]
    AlreadyBooked(LoadId),
}

/// Errors raised while an agent acts.  All of them are consistency
/// violations and end the run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("spatial index violation: {0}")]
    Spatial(#[from] SpatialError),

    #[error("load state violation: {0}")]
    Load(#[from] LoadError),

    #[error("load {0} is not in the load store")]
    UnknownLoad(LoadId),

    #[error("load store is full ({0} loads)")]
    LoadIdsExhausted(usize),
}

pub type AgentResult<T> = Result<T, AgentError>;
