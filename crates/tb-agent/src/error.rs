use tb_core::{AgentId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("citizen {agent} has no {place}")]
    MissingLocation { agent: AgentId, place: &'static str },

    #[error("population parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
