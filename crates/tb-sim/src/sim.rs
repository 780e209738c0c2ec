//! The `Sim` struct and its tick loop.

use log::{debug, info};
use tb_agent::CitizenStore;
use tb_core::{SimClock, SimConfig, Tick};
use tb_disease::StochasticSource;
use tb_schedule::{Event, EventKind, EventQueue};
use tb_spatial::Grid;

use crate::{SimError, SimObserver, SimResult, TickStats};

/// The main simulation runner.
///
/// `Sim<S>` owns every piece of simulation state: the citizens, the grid
/// they move on, the event queue that drives them and the stochastic source
/// every draw comes from.  Nothing is global, so independent simulations
/// can coexist (see [`run_replicates`](crate::run_replicates)).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: StochasticSource> {
    /// Run configuration (total ticks, seed, snapshot interval).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Citizen state (SoA arrays).
    pub citizens: CitizenStore,

    /// Positions and cell occupancy.
    pub grid: Grid,

    /// Pending one-time and recurring events.
    pub queue: EventQueue,

    /// Source of every random draw.
    pub source: S,

    pub(crate) initialized: bool,

    /// Tallies for the tick being dispatched.
    pub(crate) stats: TickStats,

    /// Tallies since the start of the run.
    pub(crate) totals: TickStats,
}

impl<S: StochasticSource> Sim<S> {
    pub(crate) fn new(
        config:   SimConfig,
        citizens: CitizenStore,
        grid:     Grid,
        source:   S,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            citizens,
            grid,
            queue: EventQueue::new(),
            source,
            initialized: false,
            stats: TickStats::default(),
            totals: TickStats::default(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Seed every citizen's disease course, arm its daily movement and place
    /// it at its household.
    ///
    /// Must run exactly once; [`run`](Self::run) and
    /// [`run_ticks`](Self::run_ticks) call it if it has not run yet.
    pub fn initialize(&mut self) -> SimResult<()> {
        if self.initialized {
            return Err(SimError::AlreadyInitialized);
        }
        self.queue.advance_to(self.clock.current_tick);
        for agent in self.citizens.agent_ids() {
            self.initialize_citizen(agent)?;
        }
        self.initialized = true;
        // Initial transitions are not part of any tick.
        self.stats = TickStats::default();
        debug!(
            "initialized {} citizens ({}), {} events pending",
            self.citizens.count,
            self.citizens.compartment_counts(),
            self.queue.len()
        );
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Tallies accumulated over every dispatched tick so far.
    #[inline]
    pub fn totals(&self) -> &TickStats {
        &self.totals
    }

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.ensure_initialized()?;
        info!(
            "running {} citizens from {} to {}",
            self.citizens.count,
            self.clock,
            self.config.end_tick()
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            "finished at {}: {} ({} events dispatched)",
            self.clock,
            self.citizens.compartment_counts(),
            self.totals.dispatched
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.ensure_initialized()?;
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn ensure_initialized(&mut self) -> SimResult<()> {
        if self.initialized { Ok(()) } else { self.initialize() }
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now)?;
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.citizens);
        }
        self.clock.advance();
        Ok(())
    }

    /// Dispatch every event due at `now`, including events registered for
    /// `now` while dispatching.
    fn process_tick(&mut self, now: Tick) -> SimResult<TickStats> {
        self.queue.advance_to(now);
        while let Some((_, event)) = self.queue.pop_due(now) {
            self.stats.dispatched += 1;
            self.dispatch(event)?;
        }
        let stats = std::mem::take(&mut self.stats);
        self.totals += stats;
        Ok(stats)
    }

    fn dispatch(&mut self, event: Event) -> SimResult<()> {
        let agent = event.agent;
        match event.kind {
            EventKind::WakeUp                  => self.wake_up(agent)?,
            EventKind::ReturnHome              => self.return_home(agent)?,
            EventKind::TransitionToInfected    => self.transition_to_infected(agent)?,
            EventKind::TransitionToOnTreatment => self.transition_to_on_treatment(agent)?,
            EventKind::TransitionToImmune      => self.transition_to_immune(agent),
            EventKind::TransitionToSusceptible => self.transition_to_susceptible(agent),
            EventKind::ExpelParticles          => self.expel_particles(agent),
        }
        Ok(())
    }
}
