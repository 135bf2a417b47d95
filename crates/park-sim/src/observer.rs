//! Park observer trait for progress reporting and data collection.

use park_core::Tick;
use park_ride::{ReleaseDecision, Ride, RunReport};
use park_visitor::{Visitor, VisitorStore};

use crate::Finances;

/// Head counts and money at the end of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Simulated Unix time of the tick.
    pub unix_secs: i64,
    /// Visitors standing in a ride queue.
    pub waiting:   usize,
    /// Visitors on a running ride.
    pub riding:    usize,
    /// Free pedestrians.
    pub walking:   usize,
    /// Visitors that left through the exit, since the start.
    pub departed:  u64,
    /// Visitors removed with nowhere to go, since the start.
    pub stranded:  u64,
    /// Runs that finished during this tick.
    pub runs_completed: usize,
    /// Ticket revenue across all rides, since the start.
    pub total_revenue:  u64,
}

/// Callbacks invoked by [`Park::run`][crate::Park::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — run logger
///
/// ```rust,ignore
/// struct RunLogger;
///
/// impl ParkObserver for RunLogger {
///     fn on_run_completed(&mut self, ride: &Ride, run: &RunReport) {
///         println!("{} carried {} riders", ride.id(), run.riders);
///     }
/// }
/// ```
pub trait ParkObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A ride boarded `riders` visitors and left `Idle`.
    fn on_run_started(&mut self, _tick: Tick, _ride: &Ride, _riders: usize) {}

    /// A ride finished a run.  `ride` already reflects the accrued revenue.
    fn on_run_completed(&mut self, _ride: &Ride, _run: &RunReport) {}

    /// One rider of a finished run was sent on.
    fn on_visitor_released(&mut self, _tick: Tick, _visitor: &Visitor, _decision: ReleaseDecision) {}

    /// A visitor left the park.  `stranded` is `true` when it was removed
    /// because no ride and no exit could be reached.
    fn on_visitor_departed(&mut self, _tick: Tick, _visitor: &Visitor, _stranded: bool) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    fn on_snapshot(&mut self, _tick: Tick, _rides: &[Ride], _visitors: &VisitorStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _finances: &Finances) {}
}

/// A [`ParkObserver`] that does nothing.
pub struct NoopObserver;

impl ParkObserver for NoopObserver {}
