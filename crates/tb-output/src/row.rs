//! Plain data row types written by output backends.

use tb_agent::CompartmentCounts;
use tb_sim::TickStats;

/// Citizens per compartment at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompartmentCountsRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub susceptible:    u64,
    pub exposed:        u64,
    pub infected:       u64,
    pub on_treatment:   u64,
    pub immune:         u64,
    /// Exposed + infected + on treatment.
    pub active_cases:   u64,
}

impl CompartmentCountsRow {
    pub fn new(tick: u64, unix_time_secs: i64, counts: &CompartmentCounts) -> Self {
        Self {
            tick,
            unix_time_secs,
            susceptible:  counts.susceptible,
            exposed:      counts.exposed,
            infected:     counts.infected,
            on_treatment: counts.on_treatment,
            immune:       counts.immune,
            active_cases: counts.active_cases(),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub unix_time_secs:     i64,
    pub dispatched:         u64,
    pub new_exposures:      u64,
    pub reverted_exposures: u64,
    pub new_infections:     u64,
    pub treatments_started: u64,
    pub dropouts:           u64,
    pub recoveries:         u64,
    pub immunity_losses:    u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, unix_time_secs: i64, stats: &TickStats) -> Self {
        Self {
            tick,
            unix_time_secs,
            dispatched:         stats.dispatched,
            new_exposures:      stats.new_exposures,
            reverted_exposures: stats.reverted_exposures,
            new_infections:     stats.new_infections,
            treatments_started: stats.treatments_started,
            dropouts:           stats.dropouts,
            recoveries:         stats.recoveries,
            immunity_losses:    stats.immunity_losses,
        }
    }
}
