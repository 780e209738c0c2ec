//! Spatial-subsystem error type.

use thiserror::Error;

use tb_core::{AgentId, Point};

/// Errors produced by `tb-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid dimensions must be non-zero (got {width} x {height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("point {point} lies outside the {width} x {height} grid")]
    OutOfBounds { point: Point, width: u32, height: u32 },

    #[error("agent {0} is not tracked by this grid")]
    AgentNotFound(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
