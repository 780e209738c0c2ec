//! Independent replicate runs.
//!
//! A stochastic model is read over many seeds.  Each replicate builds its own
//! [`Sim`] (own citizens, queue, grid and source) from a seed, so replicates
//! share nothing and can run on separate threads with the `parallel`
//! feature.  Dispatch inside each replicate is unchanged.

use log::info;
use tb_agent::CompartmentCounts;
use tb_disease::StochasticSource;

use crate::{Sim, SimObserver, SimResult, TickStats};

/// What one replicate leaves behind.
pub struct ReplicateOutcome<O> {
    pub seed:         u64,
    pub observer:     O,
    pub final_counts: CompartmentCounts,
    pub totals:       TickStats,
}

/// Build, run and summarise one simulation per seed.
///
/// `build_sim` and `make_observer` are called once per seed.  Outcomes are
/// returned in `seeds` order; the first error aborts the batch.
///
/// With the `parallel` feature replicates run on Rayon's thread pool,
/// otherwise one after another.
pub fn run_replicates<S, O, B, M>(
    seeds:         &[u64],
    build_sim:     B,
    make_observer: M,
) -> SimResult<Vec<ReplicateOutcome<O>>>
where
    S: StochasticSource,
    O: SimObserver + Send,
    B: Fn(u64) -> SimResult<Sim<S>> + Sync + Send,
    M: Fn(u64) -> O + Sync + Send,
{
    info!("running {} replicates", seeds.len());
    let run_one = |seed: u64| -> SimResult<ReplicateOutcome<O>> {
        let mut sim = build_sim(seed)?;
        let mut observer = make_observer(seed);
        sim.run(&mut observer)?;
        Ok(ReplicateOutcome {
            seed,
            observer,
            final_counts: sim.citizens.compartment_counts(),
            totals:       *sim.totals(),
        })
    };

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| run_one(seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds.par_iter().map(|&seed| run_one(seed)).collect()
    }
}
