//! `tb-disease` — the numbers behind the disease model.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`params`]  | `Parameters` (JSON), `ParameterStore` (tunable overlay)        |
//! | [`risk`]    | `RiskProfile`, multiplicative risk composition                 |
//! | [`dose`]    | Wells–Riley airborne dose-response                             |
//! | [`random`]  | `StochasticSource` trait, `Randomizer` default implementation  |
//! | [`error`]   | `DiseaseError`, `DiseaseResult<T>`                             |
//!
//! Every draw the state machine needs goes through [`StochasticSource`], so
//! simulations can swap in a scripted source for deterministic tests or a
//! differently parameterised one for sensitivity runs.

pub mod dose;
pub mod error;
pub mod params;
pub mod random;
pub mod risk;

#[cfg(test)]
mod tests;

pub use dose::{AirborneExposure, wells_riley_probability};
pub use error::{DiseaseError, DiseaseResult};
pub use params::{ParameterStore, Parameters, load_parameters_json};
pub use random::{Randomizer, StochasticSource};
pub use risk::RiskProfile;
