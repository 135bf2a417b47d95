//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `ride_runs.csv`
//! - `ride_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RideRunRow, RideSnapshotRow, TickSummaryRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    runs:      Writer<File>,
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut runs = Writer::from_path(dir.join("ride_runs.csv"))?;
        runs.write_record(["ride_id", "subtype", "start_tick", "end_tick", "riders", "revenue"])?;

        let mut snapshots = Writer::from_path(dir.join("ride_snapshots.csv"))?;
        snapshots.write_record(["tick", "ride_id", "subtype", "state", "waiting", "loaded", "revenue"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "unix_time_secs", "waiting", "riding", "walking", "departed", "total_revenue",
        ])?;

        Ok(Self {
            runs,
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_ride_run(&mut self, row: &RideRunRow) -> OutputResult<()> {
        self.runs.write_record(&[
            row.ride_id.to_string(),
            row.subtype.clone(),
            row.start_tick.to_string(),
            row.end_tick.to_string(),
            row.riders.to_string(),
            row.revenue.to_string(),
        ])?;
        Ok(())
    }

    fn write_ride_snapshots(&mut self, rows: &[RideSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.ride_id.to_string(),
                row.subtype.clone(),
                row.state.to_owned(),
                row.waiting.to_string(),
                row.loaded.to_string(),
                row.revenue.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_secs.to_string(),
            row.waiting.to_string(),
            row.riding.to_string(),
            row.walking.to_string(),
            row.departed.to_string(),
            row.total_revenue.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.runs.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
