use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiseaseError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("parameter file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DiseaseResult<T> = Result<T, DiseaseError>;
