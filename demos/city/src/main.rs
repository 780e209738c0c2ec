//! city — one year of tuberculosis transmission in a synthetic city.
//!
//! ```text
//! cargo run --release -p city [params.json] [population.csv]
//! ```
//!
//! Without a population file, `susceptible_count + exposed_count` citizens
//! are scattered over a GRID_SIZE × GRID_SIZE grid.  `TB_LOG=debug` shows
//! initialization and relapses; `TB_LOG=trace` shows every transition.

mod logging;
mod population;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use tb_agent::{CitizenStore, load_population_csv};
use tb_core::{SimConfig, SimRng, TICKS_PER_DAY, Tick};
use tb_disease::{Parameters, Randomizer, load_parameters_json};
use tb_output::{CsvWriter, OutputWriter, SimOutputObserver};
use tb_sim::{SimBuilder, SimObserver, TickStats};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const SIM_DAYS:   u64 = 365;
const GRID_SIZE:  u32 = 60;
const OUTPUT_DIR: &str = "output/city";

// ── Observer wrapper printing weekly progress ─────────────────────────────────

struct WeeklyReport<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    week:  TickStats,
}

impl<W: OutputWriter> SimObserver for WeeklyReport<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.week += *stats;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, citizens: &CitizenStore) {
        self.inner.on_snapshot(tick, citizens);
        if tick.day() % 7 == 0 {
            println!(
                "day {:>3}  {}  exposures {:>4}  infections {:>3}  dropouts {:>3}",
                tick.day(),
                citizens.compartment_counts(),
                self.week.new_exposures,
                self.week.new_infections,
                self.week.dropouts,
            );
            self.week = TickStats::default();
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init()?;

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let params_path = args.next();
    let population_path = args.next();

    // 1. Parameters.
    let params = match &params_path {
        Some(p) => load_parameters_json(p).with_context(|| format!("loading {}", p.display()))?,
        None => Parameters::default(),
    };
    info!("parameters: {}", serde_json::to_string(&params)?);

    // 2. Population.
    let mut source = Randomizer::new(params.clone(), SEED)?;
    let (population, grid) = match &population_path {
        Some(p) => {
            let b = load_population_csv(p).with_context(|| format!("loading {}", p.display()))?;
            (b, None)
        }
        None => {
            let mut rng = SimRng::new(SEED ^ 0x5eed);
            let b = population::synthetic(
                &mut rng,
                params.susceptible_count,
                params.exposed_count,
                GRID_SIZE,
                GRID_SIZE,
            );
            (b, Some((GRID_SIZE, GRID_SIZE)))
        }
    };
    let citizens = population.build(&mut source)?;

    println!("=== city — urban tuberculosis model ===");
    println!("Citizens: {}  |  Days: {SIM_DAYS}  |  Seed: {SEED}", citizens.count);
    println!("Start:    {}", citizens.compartment_counts());
    println!();

    // 3. Sim.
    let config = SimConfig {
        start_unix_secs:       1_700_000_000,
        total_ticks:           SIM_DAYS * TICKS_PER_DAY,
        seed:                  SEED,
        output_interval_ticks: TICKS_PER_DAY,
    };
    let mut builder = SimBuilder::new(config.clone(), citizens, source);
    if let Some((w, h)) = grid {
        builder = builder.grid(w, h);
    }
    let mut sim = builder.build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = WeeklyReport {
        inner: SimOutputObserver::new(writer, &config),
        week:  TickStats::default(),
    };

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let totals = sim.totals();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  final               : {}", sim.citizens.compartment_counts());
    println!("  events dispatched   : {}", totals.dispatched);
    println!("  exposures (kept)    : {}", totals.new_exposures);
    println!("  exposures (cleared) : {}", totals.reverted_exposures);
    println!("  infections          : {}", totals.new_infections);
    println!("  treatment dropouts  : {}", totals.dropouts);
    println!("  recoveries          : {}", totals.recoveries);
    println!("  output              : {OUTPUT_DIR}/");
    Ok(())
}
