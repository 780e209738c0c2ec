//! Simulation observer trait for progress reporting and data collection.

use tb_agent::CitizenStore;
use tb_core::Tick;

use crate::TickStats;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — daily case printer
///
/// ```rust,ignore
/// struct CasePrinter;
///
/// impl SimObserver for CasePrinter {
///     fn on_snapshot(&mut self, tick: Tick, citizens: &CitizenStore) {
///         println!("{tick}: {}", citizens.compartment_counts());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any dispatch.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with what happened during it.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks), after the tick's events have been dispatched.
    fn on_snapshot(&mut self, _tick: Tick, _citizens: &CitizenStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
