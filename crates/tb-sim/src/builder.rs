//! Fluent builder for constructing a [`Sim`].

use tb_agent::CitizenStore;
use tb_core::SimConfig;
use tb_disease::StochasticSource;
use tb_spatial::Grid;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, seed, snapshot interval
/// - [`CitizenStore`] — from [`tb_agent::PopulationBuilder`]
/// - `S: StochasticSource` — usually the same source that built the
///   population, so one seed drives the whole run
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                        |
/// |-----------------------|------------------------------------------------|
/// | `.grid(w, h)`         | Smallest grid holding every household/workplace |
///
/// # Example
///
/// ```rust,ignore
/// let citizens = population.build(&mut source)?;
/// let mut sim = SimBuilder::new(config, citizens, source)
///     .grid(100, 100)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: StochasticSource> {
    config:   SimConfig,
    citizens: CitizenStore,
    source:   S,
    grid:     Option<(u32, u32)>,
}

impl<S: StochasticSource> SimBuilder<S> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, citizens: CitizenStore, source: S) -> Self {
        Self { config, citizens, source, grid: None }
    }

    /// Grid extent in cells.  Every household and workplace must lie in
    /// `[0, width) × [0, height)`.
    pub fn grid(mut self, width: u32, height: u32) -> Self {
        self.grid = Some((width, height));
        self
    }

    /// Validate inputs and return a [`Sim`] ready to initialize.
    pub fn build(self) -> SimResult<Sim<S>> {
        let count = self.citizens.count;

        // ── Validate the store ────────────────────────────────────────────
        let columns = [
            ("households", self.citizens.household.len()),
            ("workplaces", self.citizens.workplace.len()),
            ("wake-up hours", self.citizens.wake_up_hour.len()),
            ("return-home hours", self.citizens.return_home_hour.len()),
            ("compartments", self.citizens.compartment.len()),
            ("expel handles", self.citizens.expel_handle.len()),
        ];
        for (what, got) in columns {
            if got != count {
                return Err(SimError::AgentCountMismatch { expected: count, got, what });
            }
        }
        if self.config.total_ticks == 0 {
            return Err(SimError::Config("total_ticks must be > 0".into()));
        }

        // ── Grid ──────────────────────────────────────────────────────────
        let (width, height) = self.grid.unwrap_or_else(|| fit_grid(&self.citizens));
        let grid = Grid::new(width, height, count)?;
        for (home, work) in self.citizens.household.iter().zip(&self.citizens.workplace) {
            grid.check_point(*home)?;
            grid.check_point(*work)?;
        }

        Ok(Sim::new(self.config, self.citizens, grid, self.source))
    }
}

/// One cell past the furthest household or workplace in each axis.
fn fit_grid(citizens: &CitizenStore) -> (u32, u32) {
    citizens
        .household
        .iter()
        .chain(&citizens.workplace)
        .map(|p| p.cell())
        .fold((1, 1), |(w, h), c| (w.max(c.x.saturating_add(1)), h.max(c.y.saturating_add(1))))
}
