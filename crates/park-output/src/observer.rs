//! `ParkOutputObserver<W>` — bridges `ParkObserver` to an `OutputWriter`.

use log::error;

use park_core::Tick;
use park_ride::{Ride, RunReport};
use park_sim::{Finances, ParkObserver, TickStats};
use park_visitor::VisitorStore;

use crate::row::{RideRunRow, RideSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ParkObserver`] that writes ride runs, ride snapshots, and tick
/// summaries to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `ParkObserver`
/// methods have no return value.  After `park.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct ParkOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ParkOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `park.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                error!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ParkObserver for ParkOutputObserver<W> {
    fn on_run_completed(&mut self, ride: &Ride, run: &RunReport) {
        let row = RideRunRow {
            ride_id:    ride.id().0,
            subtype:    ride.subtype().to_owned(),
            start_tick: run.started.0,
            end_tick:   run.finished.0,
            riders:     run.riders as u64,
            revenue:    run.revenue,
        };
        let result = self.writer.write_ride_run(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:           tick.0,
            unix_time_secs: stats.unix_secs,
            waiting:        stats.waiting as u64,
            riding:         stats.riding as u64,
            walking:        stats.walking as u64,
            departed:       stats.departed + stats.stranded,
            total_revenue:  stats.total_revenue,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, rides: &[Ride], _visitors: &VisitorStore) {
        let rows: Vec<RideSnapshotRow> = rides
            .iter()
            .map(|ride| RideSnapshotRow {
                tick:    tick.0,
                ride_id: ride.id().0,
                subtype: ride.subtype().to_owned(),
                state:   ride.state().as_str(),
                waiting: ride.waiting().len() as u64,
                loaded:  ride.loaded().len() as u64,
                revenue: ride.accumulated_revenue(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_ride_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _finances: &Finances) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
