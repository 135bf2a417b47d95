//! The `Park` struct and its tick loop.

use std::fmt;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use park_core::{
    Chooser, NodeId, ParkConfig, ParkError, RideId, RideTile, SimClock, Tick, TileCoord, VisitorId,
    WallClock,
};
use park_ride::{DisposalReport, ReleaseRouter, Ride, RideState, RideTable, StepContext};
use park_spatial::RouteProvider;
use park_visitor::{VisitorKind, VisitorStore};

use crate::{ParkObserver, SimError, SimResult, TickStats};

// ── Finances ──────────────────────────────────────────────────────────────────

/// Money spent on rides and taken at their gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Finances {
    pub installation_spent: u64,
    pub ticket_revenue:     u64,
}

impl Finances {
    /// Revenue minus installation spending.  Negative while the park is in
    /// the red.
    pub fn balance(&self) -> i64 {
        self.ticket_revenue as i64 - self.installation_spent as i64
    }
}

impl fmt::Display for Finances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spent ${}, earned ${}, balance ${}",
            self.installation_spent,
            self.ticket_revenue,
            self.balance()
        )
    }
}

// ── Park ──────────────────────────────────────────────────────────────────────

/// The park driver.
///
/// `Park<P>` owns the clock, the visitor store, every placed ride, and the
/// route provider, and drives the three-phase tick loop:
///
/// 1. **Stroll**: free pedestrians advance along their paths and, on
///    arrival, queue for their target ride or leave through the exit.
/// 2. **Rides**: [`Ride::step`] in ascending `RideId` order.
/// 3. **Sweep**: pedestrians left without a destination are removed.
///
/// Create via [`ParkBuilder`][crate::ParkBuilder].
pub struct Park<P: RouteProvider> {
    /// Global configuration (total ticks, seed, tick duration, …).
    pub config: ParkConfig,

    /// Simulation clock; tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// Every visitor currently in the park.
    pub visitors: VisitorStore,

    /// Pathfinding used for admission, release, and redirection.
    pub provider: P,

    pub finances: Finances,

    table:        RideTable,
    /// Placed rides, ascending `RideId`.
    rides:        Vec<Ride>,
    ride_at_tile: FxHashMap<TileCoord, RideId>,
    next_ride_id: u32,
    wall_clock:   Box<dyn WallClock>,
    chooser:      Box<dyn Chooser>,
    departed:     u64,
    stranded:     u64,
}

impl<P: RouteProvider> Park<P> {
    pub(crate) fn new(
        config:     ParkConfig,
        table:      RideTable,
        provider:   P,
        wall_clock: Box<dyn WallClock>,
        chooser:    Box<dyn Chooser>,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            visitors: VisitorStore::new(),
            provider,
            finances: Finances::default(),
            table,
            rides: Vec::new(),
            ride_at_tile: FxHashMap::default(),
            next_ride_id: 0,
            wall_clock,
            chooser,
            departed: 0,
            stranded: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Placed rides in ascending `RideId` order.
    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn ride(&self, id: RideId) -> Option<&Ride> {
        self.ride_index(id).map(|i| &self.rides[i])
    }

    /// The ride whose queue stands on `tile`, if any.
    pub fn ride_at(&self, tile: TileCoord) -> Option<RideId> {
        self.ride_at_tile.get(&tile).copied()
    }

    pub fn table(&self) -> &RideTable {
        &self.table
    }

    /// Visitors that left through the exit so far.
    pub fn departed(&self) -> u64 {
        self.departed
    }

    /// Visitors removed with nowhere to go so far.
    pub fn stranded(&self) -> u64 {
        self.stranded
    }

    fn ride_index(&self, id: RideId) -> Option<usize> {
        self.rides.binary_search_by_key(&id, Ride::id).ok()
    }

    fn step_context(&self, now: Tick) -> StepContext {
        StepContext { now, wall_ms: self.wall_clock.now_ms() }
    }

    // ── Building ──────────────────────────────────────────────────────────

    /// Build a ride on `tile`, queueing at `access_node`.
    ///
    /// `subtype = None` picks one through the park's chooser.  The
    /// installation cost is charged immediately and the ride is added to
    /// every visitor's list of candidate rides.
    pub fn place_ride(
        &mut self,
        tile:        TileCoord,
        access_node: NodeId,
        subtype:     Option<&str>,
    ) -> SimResult<RideId> {
        if let Some(&ride) = self.ride_at_tile.get(&tile) {
            return Err(SimError::TileOccupied { tile, ride });
        }

        let (name, attributes) = self.table.resolve(subtype, &mut *self.chooser);
        let id = RideId(self.next_ride_id);
        self.next_ride_id += 1;

        let duration = self.clock.ticks_for_mins(attributes.duration_mins as u64);
        let ride = Ride::new(id, name, attributes, tile, access_node, duration);
        let ride_tile = ride.ride_tile();

        self.finances.installation_spent += attributes.installation_cost as u64;
        for v in self.visitors.iter_mut() {
            v.ride_tiles.push(ride_tile);
        }

        info!(
            "placed {id} ({}) at {tile} for ${}, {duration} ticks per run",
            ride.subtype(),
            attributes.installation_cost
        );
        self.ride_at_tile.insert(tile, id);
        self.rides.push(ride);
        Ok(id)
    }

    /// Demolish a ride.  Its riders and queue are sent back onto the
    /// footpaths with no visit recorded and no ticket charged.
    pub fn remove_ride(&mut self, id: RideId) -> SimResult<DisposalReport> {
        let idx = self.ride_index(id).ok_or(ParkError::RideNotFound(id))?;
        let mut ride = self.rides.remove(idx);
        self.ride_at_tile.remove(&ride.tile());
        for v in self.visitors.iter_mut() {
            v.ride_tiles.retain(|rt| rt.ride != id);
        }

        let ctx = self.step_context(self.clock.current_tick);
        Ok(ride.dispose(&ctx, &mut self.visitors, &self.provider)?)
    }

    // ── Visitors ──────────────────────────────────────────────────────────

    /// Let a visitor in at the entrance and send it toward its first ride
    /// (or straight back out if no ride is reachable).
    pub fn admit_visitor(
        &mut self,
        name:          impl Into<String>,
        kind:          VisitorKind,
        entrance_tile: TileCoord,
        entrance_node: NodeId,
    ) -> SimResult<VisitorId> {
        let id = self.visitors.spawn(name, kind, entrance_node, entrance_tile);
        let ride_tiles: Vec<RideTile> = self.rides.iter().map(Ride::ride_tile).collect();
        self.visitors.try_get_mut(id)?.ride_tiles = ride_tiles;

        let ctx = self.step_context(self.clock.current_tick);
        let decision = ReleaseRouter::dispatch(id, &mut self.visitors, &self.provider, &ctx)?;
        info!("admitted {id} at {entrance_tile}: {decision:?}");
        Ok(id)
    }

    /// Put a free pedestrian straight into a ride's queue.
    pub fn enqueue(&mut self, visitor: VisitorId, ride: RideId) -> SimResult<()> {
        let idx = self.ride_index(ride).ok_or(ParkError::RideNotFound(ride))?;
        self.rides[idx].enqueue(visitor, &mut self.visitors)?;
        Ok(())
    }

    // ── Public run API ────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: ParkObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick_once(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick, &self.finances);
        info!("park closed at {}: {}", self.clock, self.finances);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: ParkObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_once(observer)?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_once<O: ParkObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let ctx = self.step_context(now);
        self.stroll(&ctx, observer)?;
        let runs_completed = self.step_rides(&ctx, observer)?;
        self.sweep_stranded(now, observer);

        let stats = self.tick_stats(now, runs_completed);
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.rides, &self.visitors);
        }

        self.clock.advance();
        Ok(())
    }

    /// Phase ①: move every free pedestrian one node.
    fn stroll<O: ParkObserver>(&mut self, ctx: &StepContext, observer: &mut O) -> SimResult<()> {
        if !ctx.now.0.is_multiple_of(self.config.walk_ticks_per_node) {
            return Ok(());
        }

        let walkers: Vec<VisitorId> = self
            .visitors
            .iter()
            .filter(|v| v.owner().is_pedestrian() && v.destination.is_some())
            .map(|v| v.id)
            .collect();

        for id in walkers {
            let Some(v) = self.visitors.get_mut(id) else { continue };
            let Some(here) = v.destination else { continue };
            v.origin = here;
            let next = v
                .path_to_destination
                .iter()
                .position(|&n| n == here)
                .and_then(|i| v.path_to_destination.get(i + 1))
                .copied();

            match next {
                Some(n) => {
                    v.destination = Some(n);
                    v.refresh_world_position(|n| self.provider.node_position(n));
                }
                None => self.arrive(id, ctx, observer)?,
            }
        }
        Ok(())
    }

    /// A pedestrian reached the end of its path.
    fn arrive<O: ParkObserver>(
        &mut self,
        id:       VisitorId,
        ctx:      &StepContext,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(v) = self.visitors.get(id) else { return Ok(()) };

        if v.is_leaving {
            if let Some(v) = self.visitors.remove(id) {
                self.departed += 1;
                debug!("{} left the park at {}", v.name, ctx.now);
                observer.on_visitor_departed(ctx.now, &v, false);
            }
            return Ok(());
        }

        let target = v
            .final_destination_tile
            .and_then(|tile| self.ride_at_tile.get(&tile).copied())
            .and_then(|ride| self.ride_index(ride));

        match target {
            Some(idx) => self.rides[idx].enqueue(id, &mut self.visitors)?,
            None => {
                debug!("{id} arrived but its ride is gone; picking another");
                ReleaseRouter::dispatch(id, &mut self.visitors, &self.provider, ctx)?;
            }
        }
        Ok(())
    }

    /// Phase ②: step every ride.  Returns the number of runs that finished.
    fn step_rides<O: ParkObserver>(
        &mut self,
        ctx:      &StepContext,
        observer: &mut O,
    ) -> SimResult<usize> {
        let mut completed = 0;

        for ride in &mut self.rides {
            let was_idle = ride.state() == RideState::Idle;
            let outcome = ride.step(ctx, &mut self.visitors, &self.provider)?;

            if was_idle && ride.state() == RideState::Operating {
                observer.on_run_started(ctx.now, ride, outcome.loaded);
            }

            if let Some(run) = outcome.completed {
                completed += 1;
                self.finances.ticket_revenue += run.revenue;
                observer.on_run_completed(ride, &run);
                for &(id, decision) in &run.release.decisions {
                    if let Some(v) = self.visitors.get(id) {
                        observer.on_visitor_released(ctx.now, v, decision);
                    }
                }
            }
        }
        Ok(completed)
    }

    /// Phase ③: remove pedestrians with nowhere to go.
    fn sweep_stranded<O: ParkObserver>(&mut self, now: Tick, observer: &mut O) {
        for id in self.visitors.stranded() {
            if let Some(v) = self.visitors.remove(id) {
                self.stranded += 1;
                warn!("removing {} at {now}: no ride or exit reachable", v.name);
                observer.on_visitor_departed(now, &v, true);
            }
        }
    }

    fn tick_stats(&self, now: Tick, runs_completed: usize) -> TickStats {
        let (walking, waiting, riding) = self.visitors.owner_counts();
        TickStats {
            unix_secs: self.clock.unix_secs_at(now),
            waiting,
            riding,
            walking,
            departed: self.departed,
            stranded: self.stranded,
            runs_completed,
            total_revenue: self.finances.ticket_revenue,
        }
    }
}
