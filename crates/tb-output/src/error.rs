//! Errors raised while persisting model output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Writers never create directories; the caller owns the layout.
    #[error("output directory {0} does not exist")]
    MissingDir(PathBuf),

    #[error("output I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("compartment/summary CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("output database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Reject `dir` unless it is an existing directory.
pub(crate) fn ensure_dir(dir: &std::path::Path) -> OutputResult<()> {
    if dir.is_dir() { Ok(()) } else { Err(OutputError::MissingDir(dir.to_path_buf())) }
}
