//! `park-output` — simulation output writers for the rust_park simulation.
//!
//! | Backend | Files created                                                  |
//! |---------|----------------------------------------------------------------|
//! | CSV     | `ride_runs.csv`, `ride_snapshots.csv`, `tick_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`ParkOutputObserver`], which implements `park_sim::ParkObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use park_output::{CsvWriter, ParkOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ParkOutputObserver::new(writer);
//! park.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ParkOutputObserver;
pub use row::{RideRunRow, RideSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
