//! The `Ride` entity and its per-tick state machine.

use std::fmt;

use log::{info, warn};

use park_core::{NodeId, RideId, RideTile, Tick, TileCoord, VisitorId};
use park_spatial::RouteProvider;
use park_visitor::VisitorStore;

use crate::{
    ReleaseReport, ReleaseRouter, RideAttributes, RideError, RideResult, RideSummary, VisitorQueue,
};

// ── RideState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RideState {
    #[default]
    Idle,
    Operating,
}

impl RideState {
    pub fn as_str(self) -> &'static str {
        match self {
            RideState::Idle      => "idle",
            RideState::Operating => "in operation",
        }
    }
}

impl fmt::Display for RideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Step inputs / outputs ─────────────────────────────────────────────────────

/// Read-only per-tick inputs, built once per tick by the park driver.
#[derive(Copy, Clone, Debug)]
pub struct StepContext {
    /// Current simulation tick.
    pub now:     Tick,
    /// Real wall-clock milliseconds, stamped onto released visitors.
    pub wall_ms: u64,
}

/// One finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub started:  Tick,
    pub finished: Tick,
    pub riders:   usize,
    /// Revenue added by this run (`ticket_price × riders`).
    pub revenue:  u64,
    pub release:  ReleaseReport,
}

/// What one call to [`Ride::step`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Riders boarded this tick (0 if no run started).
    pub loaded:    usize,
    /// Set when a run finished this tick.
    pub completed: Option<RunReport>,
}

/// Visitors handed back when a ride is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisposalReport {
    /// Riders evicted mid-run (no revenue, no visit recorded).
    pub evicted_riders:  usize,
    /// Visitors turned away from the queue.
    pub evicted_waiting: usize,
    pub release:         ReleaseReport,
}

// ── Ride ──────────────────────────────────────────────────────────────────────

/// A placed attraction.
///
/// The ride holds visitor ids only.  While an id sits in `waiting` or
/// `loaded`, the visitor's owner tag names this ride and nothing else may
/// write its navigation fields.
#[derive(Debug)]
pub struct Ride {
    id:          RideId,
    subtype:     String,
    tile:        TileCoord,
    access_node: NodeId,
    attributes:  RideAttributes,
    /// Run length in ticks.
    ride_duration: u64,

    state:               RideState,
    /// Start of the current (or most recent) run; `None` before the first.
    last_run_time:       Option<Tick>,
    accumulated_revenue: u64,
    waiting:             VisitorQueue,
    loaded:              Vec<VisitorId>,

    /// Set on every state change; renderers poll and clear it.
    mesh_out_of_date: bool,
    runs_completed:   u64,
    total_riders:     u64,
}

impl Ride {
    /// Build a ride from resolved attributes.
    ///
    /// `access_node` is the footpath node in front of the queue; boarding
    /// visitors stand there and are released from there.  `ride_duration`
    /// is in ticks.
    pub fn new(
        id:            RideId,
        subtype:       impl Into<String>,
        attributes:    RideAttributes,
        tile:          TileCoord,
        access_node:   NodeId,
        ride_duration: u64,
    ) -> Self {
        let subtype = subtype.into();
        if attributes.capacity == 0 {
            warn!("{id} ({subtype}) has zero capacity and will never run");
        }
        Self {
            id,
            subtype,
            tile,
            access_node,
            attributes,
            ride_duration,
            state: RideState::Idle,
            last_run_time: None,
            accumulated_revenue: 0,
            waiting: VisitorQueue::new(),
            loaded: Vec::new(),
            mesh_out_of_date: true,
            runs_completed: 0,
            total_riders: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> RideId { self.id }
    pub fn subtype(&self) -> &str { &self.subtype }
    pub fn tile(&self) -> TileCoord { self.tile }
    pub fn access_node(&self) -> NodeId { self.access_node }
    pub fn attributes(&self) -> &RideAttributes { &self.attributes }
    pub fn ride_duration(&self) -> u64 { self.ride_duration }
    pub fn state(&self) -> RideState { self.state }
    pub fn last_run_time(&self) -> Option<Tick> { self.last_run_time }
    pub fn accumulated_revenue(&self) -> u64 { self.accumulated_revenue }
    pub fn waiting(&self) -> &VisitorQueue { &self.waiting }
    pub fn loaded(&self) -> &[VisitorId] { &self.loaded }
    pub fn runs_completed(&self) -> u64 { self.runs_completed }
    pub fn total_riders(&self) -> u64 { self.total_riders }
    pub fn mesh_out_of_date(&self) -> bool { self.mesh_out_of_date }

    /// The ride and its queue tile, as visitors see it.
    pub fn ride_tile(&self) -> RideTile {
        RideTile { ride: self.id, tile: self.tile }
    }

    /// Return and clear the re-render flag.
    pub fn take_mesh_out_of_date(&mut self) -> bool {
        std::mem::take(&mut self.mesh_out_of_date)
    }

    /// `true` if visitors are waiting but the ride can never take them.
    pub fn is_stalled(&self) -> bool {
        self.attributes.capacity == 0 && !self.waiting.is_empty()
    }

    // ── Boarding side ─────────────────────────────────────────────────────

    /// Put a pedestrian at the back of the queue.
    ///
    /// The visitor is checked out of the pedestrian pool: its owner becomes
    /// this ride, it stands on the access node, and it stops walking.
    pub fn enqueue(&mut self, visitor: VisitorId, visitors: &mut VisitorStore) -> RideResult<()> {
        let v = visitors.try_get_mut(visitor)?;
        v.join_queue(self.id).map_err(|owner| RideError::VisitorBusy {
            visitor,
            ride: self.id,
            owner,
        })?;
        v.origin = self.access_node;
        v.destination = None;
        v.path_to_destination.clear();
        v.is_paused = true;
        self.waiting.push_back(visitor);
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the ride by one tick.
    ///
    /// Idle → Operating is evaluated first.  Operating → Idle is evaluated
    /// only if the ride was already operating when the tick began.
    pub fn step<P: RouteProvider + ?Sized>(
        &mut self,
        ctx:      &StepContext,
        visitors: &mut VisitorStore,
        provider: &P,
    ) -> RideResult<StepOutcome> {
        let was_operating = self.state == RideState::Operating;
        let mut outcome = StepOutcome::default();

        if self.state == RideState::Idle && !self.waiting.is_empty() {
            outcome.loaded = self.start_run(ctx.now, visitors);
        }

        if was_operating && self.run_is_due(ctx.now) {
            outcome.completed = Some(self.finish_run(ctx, visitors, provider)?);
        }

        Ok(outcome)
    }

    fn run_is_due(&self, now: Tick) -> bool {
        self.last_run_time
            .is_some_and(|start| now >= start + self.ride_duration)
    }

    /// Board the front of the queue.  Returns the number boarded; zero
    /// (capacity 0, or nobody in the batch could board) leaves the ride idle.
    fn start_run(&mut self, now: Tick, visitors: &mut VisitorStore) -> usize {
        let n = self.waiting.len().min(self.attributes.capacity as usize);
        if n == 0 {
            return 0;
        }

        for id in self.waiting.take_front(n) {
            let Some(v) = visitors.get_mut(id) else {
                warn!("{}: queued visitor {id} left the park before boarding", self.id);
                continue;
            };
            if let Err(owner) = v.board(self.id) {
                warn!("{}: queued visitor {id} is {owner}; not boarding", self.id);
                continue;
            }
            v.visible = false;
            self.loaded.push(id);
        }
        if self.loaded.is_empty() {
            return 0;
        }

        self.last_run_time = Some(now);
        self.state = RideState::Operating;
        self.mesh_out_of_date = true;
        info!(
            "{} ({}) started a run at {now} with {} riders, {} still waiting",
            self.id, self.subtype, self.loaded.len(), self.waiting.len()
        );
        self.loaded.len()
    }

    fn finish_run<P: RouteProvider + ?Sized>(
        &mut self,
        ctx:      &StepContext,
        visitors: &mut VisitorStore,
        provider: &P,
    ) -> RideResult<RunReport> {
        let release = ReleaseRouter::release(self.id, &self.loaded, visitors, provider, ctx)?;

        let riders = self.loaded.len();
        let revenue = self.attributes.ticket_price as u64 * riders as u64;
        self.accumulated_revenue += revenue;
        self.loaded.clear();
        self.state = RideState::Idle;
        self.mesh_out_of_date = true;
        self.runs_completed += 1;
        self.total_riders += riders as u64;

        info!(
            "{} ({}) finished a run at {}: {riders} riders, +${revenue} (total ${})",
            self.id, self.subtype, ctx.now, self.accumulated_revenue
        );

        Ok(RunReport {
            started: self.last_run_time.unwrap_or(ctx.now),
            finished: ctx.now,
            riders,
            revenue,
            release,
        })
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Hand every held visitor back to the footpaths before the ride is
    /// removed.  Riders mid-run pay nothing and the run is not counted.
    pub fn dispose<P: RouteProvider + ?Sized>(
        &mut self,
        ctx:      &StepContext,
        visitors: &mut VisitorStore,
        provider: &P,
    ) -> RideResult<DisposalReport> {
        let mut held: Vec<VisitorId> = self.loaded.clone();
        held.extend(self.waiting.iter());
        let evicted_riders = self.loaded.len();
        let evicted_waiting = self.waiting.len();

        let release = ReleaseRouter::reroute(self.id, &held, visitors, provider, ctx)?;

        self.loaded.clear();
        self.waiting.drain_all();
        self.state = RideState::Idle;
        self.mesh_out_of_date = true;
        info!(
            "{} ({}) removed; {evicted_riders} riders and {evicted_waiting} waiting sent back out",
            self.id, self.subtype
        );

        Ok(DisposalReport { evicted_riders, evicted_waiting, release })
    }

    // ── Display ───────────────────────────────────────────────────────────

    /// Snapshot for the info panel.  Visitors no longer in `visitors` are
    /// listed by id.
    pub fn summary(&self, visitors: &VisitorStore) -> RideSummary {
        let name_of = |id: VisitorId| {
            visitors
                .get(id)
                .map(|v| v.to_string())
                .unwrap_or_else(|| id.to_string())
        };
        RideSummary {
            id:                self.id,
            subtype:           self.subtype.clone(),
            thrill_level:      self.attributes.thrill_level,
            installation_cost: self.attributes.installation_cost,
            ticket_price:      self.attributes.ticket_price,
            duration_mins:     self.attributes.duration_mins,
            capacity:          self.attributes.capacity,
            state:             self.state,
            revenue:           self.accumulated_revenue,
            waiting:           self.waiting.iter().map(name_of).collect(),
            loaded:            self.loaded.iter().copied().map(name_of).collect(),
        }
    }
}
