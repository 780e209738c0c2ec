//! The citizen state machine.
//!
//! ```text
//!            exposure draw              incubation            diagnosis
//! Susceptible ───────────▶ Exposed ─────────────▶ Infected ─────────▶ OnTreatment
//!      ▲        gate fails   │                      ▲                    │  │
//!      └─────────────────────┘                      └──── dropout ───────┘  │
//!      │                                                                    │ treatment
//!      └──────────────────── full recovery ◀──── Immune ◀──────────────────┘
//! ```
//!
//! Every transition runs to completion synchronously.  Delays drawn in days
//! are converted with [`days_to_ticks`] and registered as one-time events;
//! the hourly particle expulsion of an `Infected` citizen is the only
//! disease-related recurring event and its handle lives in
//! `CitizenStore::expel_handle`.

use log::{debug, trace};
use tb_core::{AgentId, Compartment, TICKS_PER_DAY, Tick, days_to_ticks};
use tb_disease::StochasticSource;
use tb_schedule::{Event, EventKind};

use crate::{Sim, SimResult};

/// Ticks between two particle expulsions of an infected citizen.
pub const PARTICLE_EXPELLING_INTERVAL: u64 = 1;

impl<S: StochasticSource> Sim<S> {
    // ── Initialization ────────────────────────────────────────────────────

    /// Seed one citizen's disease course, arm its daily movement and place
    /// it at its household.
    ///
    /// An initially `Exposed` citizen always progresses (no gate draw).
    /// Citizens starting further along the cycle are started on the
    /// remainder of it: `Infected` arms expulsion and diagnosis,
    /// `OnTreatment` draws a treatment duration, `Immune` draws a recovery
    /// time.
    pub(crate) fn initialize_citizen(&mut self, agent: AgentId) -> SimResult<()> {
        match self.citizens.compartment(agent) {
            Compartment::Susceptible => {}
            Compartment::Exposed     => self.transition_to_exposed(agent, true),
            Compartment::Infected    => self.transition_to_infected(agent)?,
            Compartment::OnTreatment => self.schedule_treatment_end(agent),
            Compartment::Immune      => self.transition_to_immune(agent),
        }

        let i = agent.index();
        let now = self.queue.now();
        let wake = next_at_hour(now, self.citizens.wake_up_hour[i]);
        let back = next_at_hour(now, self.citizens.return_home_hour[i]);
        // Movement recurs for the whole run; the handles are never cancelled.
        self.queue
            .schedule_recurring(wake, TICKS_PER_DAY, Event::new(agent, EventKind::WakeUp))?;
        self.queue
            .schedule_recurring(back, TICKS_PER_DAY, Event::new(agent, EventKind::ReturnHome))?;

        self.grid.move_to(agent, self.citizens.household[i])?;
        Ok(())
    }

    // ── Disease transitions ───────────────────────────────────────────────

    /// Enter `Exposed`.
    ///
    /// With `initial` (seed cases) or when the progression gate passes, an
    /// incubation period is drawn and `TransitionToInfected` scheduled.
    /// Otherwise the citizen reverts to `Susceptible` immediately and
    /// nothing is scheduled.  `initial` skips the gate draw entirely.
    pub fn transition_to_exposed(&mut self, agent: AgentId, initial: bool) {
        self.citizens.set_compartment(agent, Compartment::Exposed);

        let progresses = initial || {
            let risk = self.citizens.risk_profile(agent);
            self.source.is_getting_infected(risk)
        };

        if progresses {
            let delay = days_to_ticks(self.source.incubation_period_days());
            self.queue
                .schedule_once(delay, Event::new(agent, EventKind::TransitionToInfected));
            if !initial {
                self.stats.new_exposures += 1;
            }
            trace!("{agent} exposed, infectious in {delay} ticks");
        } else {
            self.citizens.set_compartment(agent, Compartment::Susceptible);
            self.stats.reverted_exposures += 1;
            trace!("{agent} exposed, cleared by the progression gate");
        }
    }

    /// Enter `Infected`: start hourly particle expulsion and draw the
    /// diagnosis delay.
    pub fn transition_to_infected(&mut self, agent: AgentId) -> SimResult<()> {
        self.citizens.set_compartment(agent, Compartment::Infected);

        if let Some(stale) = self.citizens.take_expel_handle(agent) {
            self.queue.cancel(&stale);
        }
        let first = self.queue.now() + PARTICLE_EXPELLING_INTERVAL;
        let handle = self.queue.schedule_recurring(
            first,
            PARTICLE_EXPELLING_INTERVAL,
            Event::new(agent, EventKind::ExpelParticles),
        )?;
        self.citizens.set_expel_handle(agent, handle);

        let delay = days_to_ticks(self.source.days_to_diagnosis());
        self.queue
            .schedule_once(delay, Event::new(agent, EventKind::TransitionToOnTreatment));

        self.stats.new_infections += 1;
        trace!("{agent} infected, diagnosed in {delay} ticks");
        Ok(())
    }

    /// Enter `OnTreatment`, then either drop out (straight back to
    /// `Infected`) or schedule the end of treatment.
    ///
    /// The expulsion handle stored once the branch has run is cancelled.
    /// After a dropout that is the handle the relapse just armed: the
    /// relapsed citizen is `Infected` and keeps its (cancelled) handle, but
    /// expels nothing until its next diagnosis.
    pub fn transition_to_on_treatment(&mut self, agent: AgentId) -> SimResult<()> {
        self.citizens.set_compartment(agent, Compartment::OnTreatment);
        self.stats.treatments_started += 1;

        let relapsed = self.source.is_dropping_out_treatment();
        if relapsed {
            self.stats.dropouts += 1;
            debug!("{agent} dropped out of treatment");
            self.transition_to_infected(agent)?;
        } else {
            self.schedule_treatment_end(agent);
        }

        let slot = &mut self.citizens.expel_handle[agent.index()];
        if let Some(handle) = slot.as_ref() {
            self.queue.cancel(handle);
        }
        if !relapsed {
            *slot = None;
        }
        Ok(())
    }

    /// Enter `Immune` and schedule the loss of immunity.
    pub fn transition_to_immune(&mut self, agent: AgentId) {
        self.citizens.set_compartment(agent, Compartment::Immune);
        let delay = days_to_ticks(self.source.days_to_full_recovery());
        self.queue
            .schedule_once(delay, Event::new(agent, EventKind::TransitionToSusceptible));
        self.stats.recoveries += 1;
        trace!("{agent} immune for {delay} ticks");
    }

    /// Back to `Susceptible`.  Nothing is scheduled.
    pub fn transition_to_susceptible(&mut self, agent: AgentId) {
        self.citizens.set_compartment(agent, Compartment::Susceptible);
        self.stats.immunity_losses += 1;
        trace!("{agent} susceptible again");
    }

    fn schedule_treatment_end(&mut self, agent: AgentId) {
        let delay = days_to_ticks(self.source.treatment_duration_days());
        self.queue
            .schedule_once(delay, Event::new(agent, EventKind::TransitionToImmune));
        trace!("{agent} on treatment for {delay} ticks");
    }

    // ── Daily movement ────────────────────────────────────────────────────

    /// Go to work.
    pub fn wake_up(&mut self, agent: AgentId) -> SimResult<()> {
        let workplace = self.citizens.workplace[agent.index()];
        self.grid.move_to(agent, workplace)?;
        Ok(())
    }

    /// Go home.
    pub fn return_home(&mut self, agent: AgentId) -> SimResult<()> {
        let household = self.citizens.household[agent.index()];
        self.grid.move_to(agent, household)?;
        Ok(())
    }
}

/// The first tick at or after `now` whose hour of day is `hour` (mod 24).
pub(crate) fn next_at_hour(now: Tick, hour: u32) -> Tick {
    let hour = u64::from(hour) % TICKS_PER_DAY;
    let candidate = Tick(now.day() * TICKS_PER_DAY + hour);
    if candidate < now { candidate + TICKS_PER_DAY } else { candidate }
}
