//! Event payloads.
//!
//! An event names the citizen it targets and the transition to apply.  The
//! simulation loop matches on [`EventKind`] to pick the method to call, so
//! there is no string lookup or reflection at dispatch time.

use std::fmt;

use tb_core::AgentId;

/// What to do when an event fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Move to the workplace.  Recurring, once per day.
    WakeUp,
    /// Move back to the household.  Recurring, once per day.
    ReturnHome,
    /// Incubation over.
    TransitionToInfected,
    /// Diagnosis delay over.
    TransitionToOnTreatment,
    /// Treatment completed.
    TransitionToImmune,
    /// Full recovery; immunity lost.
    TransitionToSusceptible,
    /// Hourly contagion pass of an infected citizen.  Recurring.
    ExpelParticles,
}

impl EventKind {
    /// Same-tick ordering: lower fires first.
    ///
    /// Movement settles before any transition, and transitions settle before
    /// particles are expelled, so a contagion pass always sees the
    /// positions and compartments of the current hour.
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            EventKind::WakeUp | EventKind::ReturnHome => 0,
            EventKind::TransitionToInfected
            | EventKind::TransitionToOnTreatment
            | EventKind::TransitionToImmune
            | EventKind::TransitionToSusceptible => 1,
            EventKind::ExpelParticles => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::WakeUp                  => "wake_up",
            EventKind::ReturnHome              => "return_home",
            EventKind::TransitionToInfected    => "transition_to_infected",
            EventKind::TransitionToOnTreatment => "transition_to_on_treatment",
            EventKind::TransitionToImmune      => "transition_to_immune",
            EventKind::TransitionToSusceptible => "transition_to_susceptible",
            EventKind::ExpelParticles          => "expel_particles",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled call: apply `kind` to `agent`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub agent: AgentId,
    pub kind:  EventKind,
}

impl Event {
    #[inline]
    pub fn new(agent: AgentId, kind: EventKind) -> Self {
        Self { agent, kind }
    }
}
