//! Synthetic city: citizens scattered uniformly over the grid, commuting to
//! a handful of shared workplaces.

use tb_agent::{CitizenRecord, PopulationBuilder};
use tb_core::{Compartment, Point, SimRng};

/// Citizens per workplace, on average.
const CITIZENS_PER_WORKPLACE: u32 = 25;

pub fn synthetic(
    rng:         &mut SimRng,
    susceptible: u32,
    exposed:     u32,
    width:       u32,
    height:      u32,
) -> PopulationBuilder {
    let total = susceptible + exposed;
    let workplaces: Vec<Point> = (0..(total / CITIZENS_PER_WORKPLACE).max(1))
        .map(|_| random_point(rng, width, height))
        .collect();

    let mut builder = PopulationBuilder::with_capacity(total as usize);
    for i in 0..total {
        let household = random_point(rng, width, height);
        let workplace = workplaces[rng.gen_range(0..workplaces.len())];
        let compartment = if i < exposed { Compartment::Exposed } else { Compartment::Susceptible };
        builder.push(CitizenRecord::new(household, workplace).with_compartment(compartment));
    }
    builder
}

fn random_point(rng: &mut SimRng, width: u32, height: u32) -> Point {
    Point::new(
        rng.gen_range(0.0..f64::from(width)),
        rng.gen_range(0.0..f64::from(height)),
    )
}
