//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where they need it.

use thiserror::Error;

/// Errors produced by `tb-core` parsing and validation helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown compartment {0:?}")]
    UnknownCompartment(String),

    #[error("point ({x}, {y}) has a negative or non-finite coordinate")]
    InvalidPoint { x: f64, y: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
