use fm_agent::AgentError;
use fm_core::FmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] FmError),

    #[error("{what} length {got} does not match carrier count {expected}")]
    CarrierCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    /// A consistency violation raised by a shipper or carrier.  Fatal to
    /// the run.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
