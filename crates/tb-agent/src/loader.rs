//! CSV population loader.
//!
//! # CSV format
//!
//! One row per citizen; row order gives the `AgentId`.
//!
//! ```csv
//! household_x,household_y,workplace_x,workplace_y,compartment
//! 1.5,2.5,8.0,3.0,susceptible
//! 4.0,4.0,8.0,3.0,exposed
//! 0.5,9.1,,,
//! ```
//!
//! Empty coordinate cells leave the place unset, which
//! [`PopulationBuilder::build`] rejects.  An empty `compartment` means
//! `susceptible`; names are case-insensitive.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tb_core::{Compartment, Point};

use crate::{AgentError, AgentResult, CitizenRecord, PopulationBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PopulationRow {
    household_x: Option<f64>,
    household_y: Option<f64>,
    workplace_x: Option<f64>,
    workplace_y: Option<f64>,
    #[serde(default)]
    compartment: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load citizen records from a CSV file.
pub fn load_population_csv(path: &Path) -> AgentResult<PopulationBuilder> {
    let file = std::fs::File::open(path)?;
    load_population_reader(file)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
pub fn load_population_reader<R: Read>(reader: R) -> AgentResult<PopulationBuilder> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = PopulationBuilder::new();

    for (line, result) in csv_reader.deserialize::<PopulationRow>().enumerate() {
        let row = result.map_err(|e| AgentError::Parse(e.to_string()))?;
        let compartment = match row.compartment.as_deref().map(str::trim) {
            None | Some("") => Compartment::Susceptible,
            Some(s) => s.parse()?,
        };
        builder.push(CitizenRecord {
            household: point(row.household_x, row.household_y, line)?,
            workplace: point(row.workplace_x, row.workplace_y, line)?,
            compartment,
        });
    }

    Ok(builder)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn point(x: Option<f64>, y: Option<f64>, line: usize) -> AgentResult<Option<Point>> {
    match (x, y) {
        (Some(x), Some(y)) => Ok(Some(Point::checked(x, y)?)),
        (None, None) => Ok(None),
        _ => Err(AgentError::Parse(format!("row {}: half-specified coordinate", line + 1))),
    }
}
