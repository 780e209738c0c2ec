//! Airborne contagion.
//!
//! An infected citizen expels particles once per tick.  Each expulsion
//! exposes the occupants of the cell the citizen is standing in: the number
//! of infected occupants is counted once, then every occupant still
//! susceptible when visited draws the Wells–Riley exposure gate with that
//! count.
//!
//! Expulsions are not de-duplicated: `k` infected citizens sharing a cell
//! give each susceptible occupant `k` independent draws per tick.

use log::{trace, warn};
use tb_core::AgentId;
use tb_disease::StochasticSource;

use crate::Sim;

/// Moore radius of an expulsion.  0 = the expelling citizen's own cell.
pub const CONTAGION_RADIUS: u32 = 0;

impl<S: StochasticSource> Sim<S> {
    /// One contagion pass around `agent`.
    pub fn expel_particles(&mut self, agent: AgentId) {
        let Some(cell) = self.grid.location_of(agent) else {
            warn!("{agent} expelled particles without a location; skipped");
            return;
        };

        // Owned copies: exposures mutate citizens while we iterate.
        let cells: Vec<Vec<AgentId>> = self
            .grid
            .neighborhood(cell, CONTAGION_RADIUS, true)
            .into_iter()
            .map(|c| c.agents.to_vec())
            .collect();

        for occupants in cells {
            let infected = occupants
                .iter()
                .filter(|&&a| self.citizens.is_infected(a))
                .count();
            trace!("{agent} expels at {cell}: {} occupants, {infected} infected", occupants.len());

            for other in occupants {
                if self.citizens.is_susceptible(other) && self.source.is_getting_exposed(infected) {
                    self.transition_to_exposed(other, false);
                }
            }
        }
    }
}
