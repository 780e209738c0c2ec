//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `compartment_counts` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::error::ensure_dir;
use crate::writer::OutputWriter;
use crate::{CompartmentCountsRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        ensure_dir(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS compartment_counts (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL,
                 susceptible    INTEGER NOT NULL,
                 exposed        INTEGER NOT NULL,
                 infected       INTEGER NOT NULL,
                 on_treatment   INTEGER NOT NULL,
                 immune         INTEGER NOT NULL,
                 active_cases   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick               INTEGER PRIMARY KEY,
                 unix_time_secs     INTEGER NOT NULL,
                 dispatched         INTEGER NOT NULL,
                 new_exposures      INTEGER NOT NULL,
                 reverted_exposures INTEGER NOT NULL,
                 new_infections     INTEGER NOT NULL,
                 treatments_started INTEGER NOT NULL,
                 dropouts           INTEGER NOT NULL,
                 recoveries         INTEGER NOT NULL,
                 immunity_losses    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_counts(&mut self, row: &CompartmentCountsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO compartment_counts \
             (tick, unix_time_secs, susceptible, exposed, infected, on_treatment, immune, active_cases) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick,
                row.unix_time_secs,
                row.susceptible,
                row.exposed,
                row.infected,
                row.on_treatment,
                row.immune,
                row.active_cases,
            ],
        )?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO tick_summaries \
             (tick, unix_time_secs, dispatched, new_exposures, reverted_exposures, \
              new_infections, treatments_started, dropouts, recoveries, immunity_losses) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        stmt.execute(rusqlite::params![
            row.tick,
            row.unix_time_secs,
            row.dispatched,
            row.new_exposures,
            row.reverted_exposures,
            row.new_infections,
            row.treatments_started,
            row.dropouts,
            row.recoveries,
            row.immunity_losses,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
