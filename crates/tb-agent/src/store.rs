//! Citizen storage.
//!
//! Every `Vec` field of [`CitizenStore`] has exactly `count` elements and is
//! indexed by `AgentId`:
//!
//! ```ignore
//! let home = store.household[agent.index()];
//! ```

use std::fmt;

use tb_core::{AgentId, Compartment, Point};
use tb_disease::RiskProfile;
use tb_schedule::EventHandle;

// ── CompartmentCounts ─────────────────────────────────────────────────────────

/// Number of citizens in each compartment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompartmentCounts {
    pub susceptible:  u64,
    pub exposed:      u64,
    pub infected:     u64,
    pub on_treatment: u64,
    pub immune:       u64,
}

impl CompartmentCounts {
    #[inline]
    pub fn get(&self, c: Compartment) -> u64 {
        match c {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed     => self.exposed,
            Compartment::Infected    => self.infected,
            Compartment::OnTreatment => self.on_treatment,
            Compartment::Immune      => self.immune,
        }
    }

    fn add(&mut self, c: Compartment) {
        match c {
            Compartment::Susceptible => self.susceptible += 1,
            Compartment::Exposed     => self.exposed += 1,
            Compartment::Infected    => self.infected += 1,
            Compartment::OnTreatment => self.on_treatment += 1,
            Compartment::Immune      => self.immune += 1,
        }
    }

    pub fn total(&self) -> u64 {
        Compartment::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Exposed + infected + on treatment.
    pub fn active_cases(&self) -> u64 {
        self.exposed + self.infected + self.on_treatment
    }
}

impl fmt::Display for CompartmentCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} E={} I={} T={} R={}",
            self.susceptible, self.exposed, self.infected, self.on_treatment, self.immune
        )
    }
}

// ── CitizenStore ──────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every citizen.
///
/// Household, workplace, daily hours and risk traits are fixed once the
/// population is built.  `compartment` and `expel_handle` change as the
/// disease progresses; only the simulation writes them.
#[derive(Debug)]
pub struct CitizenStore {
    /// Number of citizens.  Equals the length of every `Vec`.
    pub count: usize,

    // ── Places ────────────────────────────────────────────────────────────
    pub household: Vec<Point>,
    pub workplace: Vec<Point>,

    // ── Daily routine (hour of day) ───────────────────────────────────────
    pub wake_up_hour:     Vec<u32>,
    pub return_home_hour: Vec<u32>,

    // ── Risk traits ───────────────────────────────────────────────────────
    pub immunosuppressed: Vec<bool>,
    pub smoker:           Vec<bool>,
    pub drinks_alcohol:   Vec<bool>,

    // ── Disease state ─────────────────────────────────────────────────────
    pub compartment:  Vec<Compartment>,
    /// Handle of the particle-expulsion recurrence while `Infected`.  A
    /// citizen relapsed by a treatment dropout holds a cancelled one.
    pub expel_handle: Vec<Option<EventHandle>>,
}

impl CitizenStore {
    /// Empty store with capacity for `count` citizens.
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count:            0,
            household:        Vec::with_capacity(count),
            workplace:        Vec::with_capacity(count),
            wake_up_hour:     Vec::with_capacity(count),
            return_home_hour: Vec::with_capacity(count),
            immunosuppressed: Vec::with_capacity(count),
            smoker:           Vec::with_capacity(count),
            drinks_alcohol:   Vec::with_capacity(count),
            compartment:      Vec::with_capacity(count),
            expel_handle:     Vec::with_capacity(count),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    ///
    /// Holds no borrow of the store, so callers may mutate citizens while
    /// iterating.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + use<> {
        (0..self.count as u32).map(AgentId)
    }

    // ── Compartment ───────────────────────────────────────────────────────

    #[inline]
    pub fn compartment(&self, agent: AgentId) -> Compartment {
        self.compartment[agent.index()]
    }

    #[inline]
    pub fn set_compartment(&mut self, agent: AgentId, c: Compartment) {
        self.compartment[agent.index()] = c;
    }

    #[inline]
    pub fn is_susceptible(&self, agent: AgentId) -> bool {
        self.compartment(agent) == Compartment::Susceptible
    }

    #[inline]
    pub fn is_exposed(&self, agent: AgentId) -> bool {
        self.compartment(agent) == Compartment::Exposed
    }

    #[inline]
    pub fn is_infected(&self, agent: AgentId) -> bool {
        self.compartment(agent) == Compartment::Infected
    }

    #[inline]
    pub fn is_on_treatment(&self, agent: AgentId) -> bool {
        self.compartment(agent) == Compartment::OnTreatment
    }

    #[inline]
    pub fn is_immune(&self, agent: AgentId) -> bool {
        self.compartment(agent) == Compartment::Immune
    }

    /// Exposed, infected or on treatment.
    #[inline]
    pub fn is_active_case(&self, agent: AgentId) -> bool {
        self.compartment(agent).is_active_case()
    }

    /// Tally of every compartment.
    pub fn compartment_counts(&self) -> CompartmentCounts {
        let mut counts = CompartmentCounts::default();
        for c in &self.compartment {
            counts.add(*c);
        }
        counts
    }

    // ── Traits ────────────────────────────────────────────────────────────

    pub fn risk_profile(&self, agent: AgentId) -> RiskProfile {
        let i = agent.index();
        RiskProfile {
            immunosuppressed: self.immunosuppressed[i],
            smoker:           self.smoker[i],
            drinks_alcohol:   self.drinks_alcohol[i],
        }
    }

    // ── Expulsion handle ──────────────────────────────────────────────────

    /// Remove and return the stored expulsion handle, if any.
    #[inline]
    pub fn take_expel_handle(&mut self, agent: AgentId) -> Option<EventHandle> {
        self.expel_handle[agent.index()].take()
    }

    #[inline]
    pub fn set_expel_handle(&mut self, agent: AgentId, handle: EventHandle) {
        self.expel_handle[agent.index()] = Some(handle);
    }

    #[inline]
    pub fn has_expel_handle(&self, agent: AgentId) -> bool {
        self.expel_handle[agent.index()].is_some()
    }
}
