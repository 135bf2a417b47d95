//! Integration tests for park-sim.

use park_core::{
    FixedChooser, FixedWallClock, NodeId, ParkConfig, RideId, Tick, TileCoord, VisitorId,
};
use park_ride::{ReleaseDecision, Ride, RideTable, RunReport};
use park_spatial::{DijkstraRouter, FootpathNetworkBuilder, GraphRouteProvider};
use park_visitor::{Visitor, VisitorKind};

use crate::{Finances, NoopObserver, Park, ParkBuilder, ParkObserver, TickStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

type TestPark = Park<GraphRouteProvider<DijkstraRouter>>;

const GATE_TILE:    TileCoord = TileCoord::new(0, 0);
const COASTER_TILE: TileCoord = TileCoord::new(3, 0);
const WHEEL_TILE:   TileCoord = TileCoord::new(1, 1);

struct Nodes {
    gate:    NodeId,
    n1:      NodeId,
    n2:      NodeId,
    coaster: NodeId,
    wheel:   NodeId,
    island:  NodeId,
}

fn test_config(total_ticks: u64) -> ParkConfig {
    ParkConfig {
        start_unix_secs:       1_000_000,
        tick_duration_secs:    60,
        total_ticks,
        seed:                  42,
        output_interval_ticks: 5,
        walk_ticks_per_node:   1,
    }
}

/// ```text
///   gate(0,0) ─ n1(1,0) ─ n2(2,0) ─ coaster(3,0)
///                  │
///               wheel(1,1)              island(9,9)
/// ```
fn test_park(max_rides: Option<usize>) -> (TestPark, Nodes) {
    let mut b = FootpathNetworkBuilder::new();
    let nodes = Nodes {
        gate:    b.add_node(GATE_TILE),
        n1:      b.add_node(TileCoord::new(1, 0)),
        n2:      b.add_node(TileCoord::new(2, 0)),
        coaster: b.add_node(COASTER_TILE),
        wheel:   b.add_node(WHEEL_TILE),
        island:  b.add_node(TileCoord::new(9, 9)),
    };
    b.add_path(nodes.gate, nodes.n1, 1_000);
    b.add_path(nodes.n1, nodes.n2, 1_000);
    b.add_path(nodes.n2, nodes.coaster, 5_000);
    b.add_path(nodes.n1, nodes.wheel, 1_000);

    let mut provider = GraphRouteProvider::new(b.build(), DijkstraRouter);
    if let Some(max) = max_rides {
        provider = provider.with_max_rides(max);
    }
    let park = ParkBuilder::new(test_config(100), RideTable::builtin(), provider)
        .wall_clock(FixedWallClock(7_000))
        .chooser(FixedChooser(0))
        .build()
        .unwrap();
    (park, nodes)
}

#[derive(Default)]
struct Recorder {
    started:   Vec<(Tick, RideId, usize)>,
    completed: Vec<(RideId, Tick, Tick, usize, u64)>,
    released:  Vec<(Tick, VisitorId, ReleaseDecision)>,
    departed:  Vec<(Tick, VisitorId, bool)>,
    stats:     Vec<(Tick, TickStats)>,
    snapshots: Vec<(Tick, usize, usize)>,
    ended:     Vec<(Tick, Finances)>,
}

impl ParkObserver for Recorder {
    fn on_run_started(&mut self, tick: Tick, ride: &Ride, riders: usize) {
        self.started.push((tick, ride.id(), riders));
    }

    fn on_run_completed(&mut self, ride: &Ride, run: &RunReport) {
        self.completed.push((ride.id(), run.started, run.finished, run.riders, run.revenue));
    }

    fn on_visitor_released(&mut self, tick: Tick, visitor: &Visitor, decision: ReleaseDecision) {
        self.released.push((tick, visitor.id, decision));
    }

    fn on_visitor_departed(&mut self, tick: Tick, visitor: &Visitor, stranded: bool) {
        self.departed.push((tick, visitor.id, stranded));
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.stats.push((tick, *stats));
    }

    fn on_snapshot(&mut self, tick: Tick, rides: &[Ride], visitors: &park_visitor::VisitorStore) {
        self.snapshots.push((tick, rides.len(), visitors.len()));
    }

    fn on_sim_end(&mut self, final_tick: Tick, finances: &Finances) {
        self.ended.push((final_tick, *finances));
    }
}

// ── ParkBuilder validation ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    fn provider() -> GraphRouteProvider<DijkstraRouter> {
        GraphRouteProvider::new(FootpathNetworkBuilder::new().build(), DijkstraRouter)
    }

    #[test]
    fn builds_with_defaults() {
        let park = ParkBuilder::new(test_config(10), RideTable::builtin(), provider())
            .build()
            .unwrap();
        assert_eq!(park.clock.current_tick, Tick::ZERO);
        assert!(park.rides().is_empty());
        assert!(park.visitors.is_empty());
        assert_eq!(park.finances, Finances::default());
    }

    #[test]
    fn zero_tick_duration_errors() {
        let mut config = test_config(10);
        config.tick_duration_secs = 0;
        let result = ParkBuilder::new(config, RideTable::builtin(), provider()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_walk_ticks_errors() {
        let mut config = test_config(10);
        config.walk_ticks_per_node = 0;
        let result = ParkBuilder::new(config, RideTable::builtin(), provider()).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Placement and removal ─────────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use park_core::ParkError;
    use park_visitor::Owner;

    use super::*;
    use crate::SimError;

    #[test]
    fn place_ride_charges_installation() {
        let (mut park, n) = test_park(None);
        let coaster = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let wheel = park.place_ride(WHEEL_TILE, n.wheel, Some("ferris-wheel")).unwrap();

        assert_eq!((coaster, wheel), (RideId(0), RideId(1)));
        assert_eq!(park.finances.installation_spent, 3_000 + 3_500);
        assert_eq!(park.finances.balance(), -6_500);
        assert_eq!(park.ride_at(COASTER_TILE), Some(coaster));
        // 2 minutes at 60 s per tick.
        assert_eq!(park.ride(coaster).unwrap().ride_duration(), 2);
    }

    #[test]
    fn missing_subtype_uses_the_chooser() {
        let (mut park, n) = test_park(None);
        let id = park.place_ride(COASTER_TILE, n.coaster, None).unwrap();
        assert_eq!(park.ride(id).unwrap().subtype(), "arcade");
    }

    #[test]
    fn unknown_subtype_places_a_stalled_ride() {
        let (mut park, n) = test_park(None);
        let id = park.place_ride(COASTER_TILE, n.coaster, Some("haunted-house")).unwrap();
        assert_eq!(park.ride(id).unwrap().attributes().capacity, 0);
        assert_eq!(park.finances.installation_spent, 0);
    }

    #[test]
    fn occupied_tile_is_rejected() {
        let (mut park, n) = test_park(None);
        let first = park.place_ride(COASTER_TILE, n.coaster, Some("carousel")).unwrap();
        let err = park.place_ride(COASTER_TILE, n.coaster, Some("arcade")).unwrap_err();
        assert!(matches!(err, SimError::TileOccupied { ride, .. } if ride == first));
        assert_eq!(park.rides().len(), 1);
    }

    #[test]
    fn new_rides_reach_existing_visitors() {
        let (mut park, n) = test_park(None);
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();
        assert!(park.visitors.get(v).unwrap().ride_tiles.is_empty());

        let id = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let tiles = &park.visitors.get(v).unwrap().ride_tiles;
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].ride, id);
    }

    #[test]
    fn remove_unknown_ride_errors() {
        let (mut park, _) = test_park(None);
        let err = park.remove_ride(RideId(4)).unwrap_err();
        assert!(matches!(err, SimError::Lookup(ParkError::RideNotFound(RideId(4)))));
    }

    #[test]
    fn enqueue_unknown_ride_errors() {
        let (mut park, n) = test_park(None);
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();
        let err = park.enqueue(v, RideId(0)).unwrap_err();
        assert!(matches!(err, SimError::Lookup(ParkError::RideNotFound(RideId(0)))));
    }

    #[test]
    fn removing_a_running_ride_evicts_riders_without_charge() {
        let (mut park, n) = test_park(None);
        let coaster = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();
        park.enqueue(v, coaster).unwrap();
        park.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(park.visitors.get(v).unwrap().owner(), Owner::Riding(coaster));

        let report = park.remove_ride(coaster).unwrap();

        assert_eq!(report.evicted_riders, 1);
        assert_eq!(report.release.exits(), 1);
        assert!(park.ride(coaster).is_none());
        assert_eq!(park.ride_at(COASTER_TILE), None);
        assert_eq!(park.finances.ticket_revenue, 0);
        let visitor = park.visitors.get(v).unwrap();
        assert_eq!(visitor.owner(), Owner::Pedestrian);
        assert!(visitor.ride_tiles.is_empty());
        assert!(visitor.visited_rides.is_empty());
        assert!(visitor.is_leaving);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use park_visitor::Owner;

    use super::*;

    #[test]
    fn admission_heads_for_the_nearest_ride() {
        let (mut park, n) = test_park(None);
        park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let wheel = park.place_ride(WHEEL_TILE, n.wheel, Some("ferris-wheel")).unwrap();
        let v = park.admit_visitor("Ada", VisitorKind::Kid, GATE_TILE, n.gate).unwrap();

        let visitor = park.visitors.get(v).unwrap();
        assert_eq!(visitor.final_destination_tile, Some(WHEEL_TILE));
        assert_eq!(visitor.path_to_destination, vec![n.gate, n.n1, n.wheel]);
        assert_eq!(visitor.destination, Some(n.n1));
        assert_eq!(visitor.cycle_start_ms, 7_000);
        assert!(!visitor.is_leaving);
        assert_eq!(park.ride_at(WHEEL_TILE), Some(wheel));
    }

    #[test]
    fn full_visit_walk_ride_leave() {
        let (mut park, n) = test_park(Some(1));
        let coaster = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let ids: Vec<VisitorId> = ["Ada", "Bo", "Cy"]
            .into_iter()
            .map(|name| park.admit_visitor(name, VisitorKind::Adult, GATE_TILE, n.gate).unwrap())
            .collect();

        let mut rec = Recorder::default();

        // T0: n1 → n2, T1: n2 → coaster, T2: arrive, queue, and board.
        park.run_ticks(3, &mut rec).unwrap();
        assert_eq!(rec.started, vec![(Tick(2), coaster, 3)]);
        for &id in &ids {
            assert_eq!(park.visitors.get(id).unwrap().owner(), Owner::Riding(coaster));
        }

        // T4: 2-tick run completes, everyone is sent to the exit.
        park.run_ticks(2, &mut rec).unwrap();
        assert_eq!(rec.completed, vec![(coaster, Tick(2), Tick(4), 3, 15)]);
        assert_eq!(park.finances.ticket_revenue, 15);
        assert_eq!(rec.released.len(), 3);
        assert!(rec.released.iter().all(|&(t, _, d)| t == Tick(4) && d == ReleaseDecision::Exit));
        let v = park.visitors.get(ids[0]).unwrap();
        assert_eq!(v.visited_rides, vec![coaster]);
        assert_eq!(v.destination, Some(n.n2));

        // T5: n2 → n1, T6: n1 → gate, T7: out.
        park.run_ticks(3, &mut rec).unwrap();
        assert!(park.visitors.is_empty());
        assert_eq!(park.departed(), 3);
        assert_eq!(rec.departed.len(), 3);
        assert!(rec.departed.iter().all(|&(t, _, stranded)| t == Tick(7) && !stranded));
        assert_eq!(park.ride(coaster).unwrap().accumulated_revenue(), 15);
    }

    #[test]
    fn tick_stats_track_head_counts() {
        let (mut park, n) = test_park(Some(1));
        park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        for name in ["Ada", "Bo"] {
            park.admit_visitor(name, VisitorKind::Elder, GATE_TILE, n.gate).unwrap();
        }

        let mut rec = Recorder::default();
        park.run_ticks(5, &mut rec).unwrap();

        let (t0, s0) = rec.stats[0];
        assert_eq!(t0, Tick(0));
        assert_eq!(s0.unix_secs, 1_000_000);
        assert_eq!((s0.walking, s0.waiting, s0.riding), (2, 0, 0));

        let (_, s2) = rec.stats[2];
        assert_eq!(s2.unix_secs, 1_000_120);
        assert_eq!((s2.walking, s2.waiting, s2.riding), (0, 0, 2));

        let (_, s4) = rec.stats[4];
        assert_eq!(s4.runs_completed, 1);
        assert_eq!(s4.total_revenue, 10);
        assert_eq!(s4.walking, 2);
    }

    #[test]
    fn slower_walkers_take_longer() {
        let (mut park, n) = test_park(None);
        park.config.walk_ticks_per_node = 3;
        let coaster = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();

        // Hops at T0, T3, T6; arrival at T6 boards immediately.
        park.run_ticks(6, &mut NoopObserver).unwrap();
        assert!(park.visitors.get(v).unwrap().owner().is_pedestrian());
        park.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(park.visitors.get(v).unwrap().owner(), Owner::Riding(coaster));
    }

    #[test]
    fn walker_redirects_when_its_ride_is_removed() {
        let (mut park, n) = test_park(None);
        let coaster = park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        let wheel = park.place_ride(WHEEL_TILE, n.wheel, Some("ferris-wheel")).unwrap();
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();
        assert_eq!(park.visitors.get(v).unwrap().final_destination_tile, Some(WHEEL_TILE));

        park.remove_ride(wheel).unwrap();

        // T0: n1 → wheel, T1: arrive at an empty lot, re-route,
        // T2: n1 → n2, T3: n2 → coaster, T4: queue and board.
        park.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(park.visitors.get(v).unwrap().owner(), Owner::Riding(coaster));
    }

    #[test]
    fn stranded_visitors_are_swept() {
        let (mut park, n) = test_park(None);
        park.place_ride(COASTER_TILE, n.coaster, Some("rollercoaster")).unwrap();
        // The island reaches no ride, and its entrance tile has no node.
        let v = park
            .admit_visitor("Ada", VisitorKind::Adult, TileCoord::new(20, 20), n.island)
            .unwrap();
        assert!(park.visitors.get(v).unwrap().destination.is_none());

        let mut rec = Recorder::default();
        park.run_ticks(1, &mut rec).unwrap();

        assert!(park.visitors.is_empty());
        assert_eq!(park.stranded(), 1);
        assert_eq!(park.departed(), 0);
        assert_eq!(rec.departed, vec![(Tick(0), v, true)]);
        assert_eq!(rec.stats[0].1.stranded, 1);
    }

    #[test]
    fn queued_visitors_are_not_swept() {
        let (mut park, n) = test_park(None);
        let stalled = park.place_ride(COASTER_TILE, n.coaster, Some("haunted-house")).unwrap();
        let v = park.admit_visitor("Ada", VisitorKind::Adult, GATE_TILE, n.gate).unwrap();
        park.enqueue(v, stalled).unwrap();

        park.run_ticks(10, &mut NoopObserver).unwrap();

        assert_eq!(park.visitors.get(v).unwrap().owner(), Owner::Queued(stalled));
        assert!(park.ride(stalled).unwrap().is_stalled());
        assert_eq!(park.stranded(), 0);
    }

    #[test]
    fn run_stops_at_end_tick() {
        let (mut park, _) = test_park(None);
        park.config.total_ticks = 12;
        let mut rec = Recorder::default();
        park.run(&mut rec).unwrap();

        assert_eq!(park.clock.current_tick, Tick(12));
        assert_eq!(rec.stats.len(), 12);
        assert_eq!(rec.ended, vec![(Tick(12), Finances::default())]);
        let snapshot_ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.0).collect();
        assert_eq!(snapshot_ticks, vec![Tick(0), Tick(5), Tick(10)]);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let (mut park, _) = test_park(None);
        park.config.total_ticks = 2;
        let mut rec = Recorder::default();
        park.run_ticks(4, &mut rec).unwrap();
        assert_eq!(park.clock.current_tick, Tick(4));
        assert!(rec.ended.is_empty());
    }
}
