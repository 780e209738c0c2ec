//! `tb-output` — simulation output writers.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                        |
//! |-----------|-------------|------------------------------------------------------|
//! | *(none)*  | CSV         | `compartment_counts.csv`, `tick_summaries.csv`       |
//! | `sqlite`  | SQLite      | `output.db`                                          |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `tb_sim::SimObserver`: one compartment-count row per
//! snapshot, one summary row per tick.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tb_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CompartmentCountsRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
