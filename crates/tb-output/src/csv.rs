//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `compartment_counts.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::error::ensure_dir;
use crate::writer::OutputWriter;
use crate::{CompartmentCountsRow, OutputResult, TickSummaryRow};

pub(crate) const COUNTS_HEADER: [&str; 8] = [
    "tick",
    "unix_time_secs",
    "susceptible",
    "exposed",
    "infected",
    "on_treatment",
    "immune",
    "active_cases",
];

pub(crate) const SUMMARY_HEADER: [&str; 10] = [
    "tick",
    "unix_time_secs",
    "dispatched",
    "new_exposures",
    "reverted_exposures",
    "new_infections",
    "treatments_started",
    "dropouts",
    "recoveries",
    "immunity_losses",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    counts:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    ///
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        ensure_dir(dir)?;
        let mut counts = Writer::from_path(dir.join("compartment_counts.csv"))?;
        counts.write_record(COUNTS_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { counts, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &CompartmentCountsRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.susceptible.to_string(),
            row.exposed.to_string(),
            row.infected.to_string(),
            row.on_treatment.to_string(),
            row.immune.to_string(),
            row.active_cases.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.dispatched.to_string(),
            row.new_exposures.to_string(),
            row.reverted_exposures.to_string(),
            row.new_infections.to_string(),
            row.treatments_started.to_string(),
            row.dropouts.to_string(),
            row.recoveries.to_string(),
            row.immunity_losses.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
