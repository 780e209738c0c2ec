//! Population construction.
//!
//! # Usage
//!
//! ```rust
//! use tb_agent::{CitizenRecord, PopulationBuilder};
//! use tb_core::{Compartment, Point};
//! use tb_disease::{Parameters, Randomizer};
//!
//! let mut source = Randomizer::new(Parameters::default(), 42).unwrap();
//! let mut builder = PopulationBuilder::new();
//! builder.push(CitizenRecord::new(Point::new(1.5, 2.5), Point::new(8.0, 3.0)));
//! builder.push(
//!     CitizenRecord::new(Point::new(4.0, 4.0), Point::new(8.0, 3.0))
//!         .with_compartment(Compartment::Exposed),
//! );
//!
//! let citizens = builder.build(&mut source).unwrap();
//! assert_eq!(citizens.count, 2);
//! ```

use log::debug;
use tb_core::{AgentId, Compartment, Point};
use tb_disease::StochasticSource;

use crate::{AgentError, AgentResult, CitizenStore};

/// Where a citizen lives and works, and the compartment it starts in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CitizenRecord {
    pub household:   Option<Point>,
    pub workplace:   Option<Point>,
    pub compartment: Compartment,
}

impl CitizenRecord {
    /// A susceptible citizen.
    pub fn new(household: Point, workplace: Point) -> Self {
        Self {
            household:   Some(household),
            workplace:   Some(workplace),
            compartment: Compartment::Susceptible,
        }
    }

    pub fn with_compartment(mut self, compartment: Compartment) -> Self {
        self.compartment = compartment;
        self
    }
}

/// Collects [`CitizenRecord`]s, then draws every citizen's routine and risk
/// traits into a [`CitizenStore`].
#[derive(Default)]
pub struct PopulationBuilder {
    records: Vec<CitizenRecord>,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(count: usize) -> Self {
        Self { records: Vec::with_capacity(count) }
    }

    /// Append a citizen; returns the id it will have in the built store.
    pub fn push(&mut self, record: CitizenRecord) -> AgentId {
        let id = AgentId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Draw traits and build the store.
    ///
    /// Every record is checked for a household and a workplace before any
    /// draw is made.  Draws then happen in `AgentId` order, five per
    /// citizen: wake-up hour, return-home hour, immunosuppression, smoking,
    /// alcohol.
    pub fn build<S: StochasticSource>(self, source: &mut S) -> AgentResult<CitizenStore> {
        let mut located = Vec::with_capacity(self.records.len());
        for (i, r) in self.records.iter().enumerate() {
            let agent = AgentId(i as u32);
            let household = r.household.ok_or(AgentError::MissingLocation { agent, place: "household" })?;
            let workplace = r.workplace.ok_or(AgentError::MissingLocation { agent, place: "workplace" })?;
            located.push((household, workplace, r.compartment));
        }

        let mut store = CitizenStore::with_capacity(located.len());
        for (household, workplace, compartment) in located {
            store.household.push(household);
            store.workplace.push(workplace);
            store.wake_up_hour.push(source.wake_up_hour());
            store.return_home_hour.push(source.return_home_hour());
            store.immunosuppressed.push(source.is_immunosuppressed());
            store.smoker.push(source.is_smoker());
            store.drinks_alcohol.push(source.drinks_alcohol());
            store.compartment.push(compartment);
            store.expel_handle.push(None);
            store.count += 1;
        }

        debug!("built population of {} ({})", store.count, store.compartment_counts());
        Ok(store)
    }
}
