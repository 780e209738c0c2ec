//! `tb-sim` — hourly dispatch loop for the urban tuberculosis model.
//!
//! # Tick loop
//!
//! ```text
//! initialize():  for every citizen in AgentId order
//!                  seed its disease course (Exposed → incubation, …)
//!                  arm daily WakeUp / ReturnHome
//!                  place it at its household
//!
//! for tick in 0..config.total_ticks:
//!   pop every event due at `tick` in (priority, registration) order
//!   and dispatch it:
//!     WakeUp / ReturnHome        → Grid::move_to
//!     TransitionTo*              → citizen state machine
//!     ExpelParticles             → contagion pass over the citizen's cell
//!   events registered for `tick` during dispatch fire in the same tick
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`sim`]         | `Sim` and its run loop                               |
//! | [`citizen`]     | Disease transitions and daily movement               |
//! | [`contagion`]   | Same-cell airborne exposure pass                     |
//! | [`builder`]     | `SimBuilder`                                         |
//! | [`observer`]    | `SimObserver`, `NoopObserver`                        |
//! | [`stats`]       | `TickStats`                                          |
//! | [`replicate`]   | `run_replicates` (parallel with `parallel`)          |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Replicates run on Rayon's thread pool.                 |
//! | `fx-hash`  | FxHash for the grid occupancy index.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tb_core::SimConfig;
//! use tb_disease::{Parameters, Randomizer};
//! use tb_sim::{NoopObserver, SimBuilder};
//!
//! let mut source = Randomizer::new(Parameters::default(), 42)?;
//! let citizens = population.build(&mut source)?;
//! let mut sim = SimBuilder::new(SimConfig::days(365, 42), citizens, source)
//!     .grid(100, 100)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod citizen;
pub mod contagion;
pub mod error;
pub mod observer;
pub mod replicate;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use replicate::{ReplicateOutcome, run_replicates};
pub use sim::Sim;
pub use stats::TickStats;
