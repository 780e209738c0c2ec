use tb_agent::AgentError;
use tb_disease::DiseaseError;
use tb_schedule::ScheduleError;
use tb_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("simulation already initialized")]
    AlreadyInitialized,

    #[error("{what} length {got} does not match citizen count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Disease(#[from] DiseaseError),
}

pub type SimResult<T> = Result<T, SimError>;
