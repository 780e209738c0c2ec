//! `tb-agent` — Structure-of-Arrays citizen storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`store`]     | `CitizenStore` (SoA arrays), `CompartmentCounts`         |
//! | [`builder`]   | `CitizenRecord`, `PopulationBuilder` (trait draws)       |
//! | [`loader`]    | Population CSV loader                                    |
//! | [`error`]     | `AgentError`, `AgentResult<T>`                           |
//!
//! Citizens are identified by [`tb_core::AgentId`]; the id is the index into
//! every array of the store.

pub mod builder;
pub mod error;
pub mod loader;
pub mod store;


pub use builder::{CitizenRecord, PopulationBuilder};
pub use error::{AgentError, AgentResult};
pub use loader::{load_population_csv, load_population_reader};
pub use store::{CitizenStore, CompartmentCounts};
