//! Per-tick event tallies.

use std::ops::AddAssign;

/// What happened during one tick.
///
/// `Sim` also keeps a running total across the whole run
/// ([`Sim::totals`](crate::Sim::totals)).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Events popped from the queue and dispatched.
    pub dispatched:         u64,
    /// Successful exposure draws whose progression gate passed.
    pub new_exposures:      u64,
    /// Successful exposure draws reverted to susceptible by the gate.
    pub reverted_exposures: u64,
    /// Entries into `Infected`, relapses included.
    pub new_infections:     u64,
    /// Entries into `OnTreatment`.
    pub treatments_started: u64,
    /// Treatment dropouts (relapses).
    pub dropouts:           u64,
    /// Entries into `Immune`.
    pub recoveries:         u64,
    /// Entries back into `Susceptible` after immunity.
    pub immunity_losses:    u64,
}

impl TickStats {
    /// `true` when no disease transition happened.
    pub fn is_quiet(&self) -> bool {
        self.new_exposures == 0
            && self.reverted_exposures == 0
            && self.new_infections == 0
            && self.treatments_started == 0
            && self.recoveries == 0
            && self.immunity_losses == 0
    }
}

impl AddAssign for TickStats {
    fn add_assign(&mut self, rhs: Self) {
        self.dispatched         += rhs.dispatched;
        self.new_exposures      += rhs.new_exposures;
        self.reverted_exposures += rhs.reverted_exposures;
        self.new_infections     += rhs.new_infections;
        self.treatments_started += rhs.treatments_started;
        self.dropouts           += rhs.dropouts;
        self.recoveries         += rhs.recoveries;
        self.immunity_losses    += rhs.immunity_losses;
    }
}
