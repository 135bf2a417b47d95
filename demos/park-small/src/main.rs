//! park-small — smallest demo for the rust_park simulation.
//!
//! Builds an eight-node park with four rides, lets visitors in through the
//! gate in three waves, and runs a six-hour opening at one tick per minute.
//! Ride runs, ride snapshots, and tick summaries are written as CSV to
//! `output/park-small/`.
//!
//! Pass a ride-table CSV path as the first argument to replace the stock
//! ride catalogue.  The event log defaults to `info`; set `RUST_LOG=debug` to
//! see every routing decision.

mod layout;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use log::info;

use park_core::{ParkConfig, SimRng, Tick, TileCoord};
use park_output::{CsvWriter, OutputWriter, ParkOutputObserver};
use park_ride::{load_ride_table_csv, Ride, RideTable, RunReport};
use park_sim::{Finances, ParkBuilder, ParkObserver, TickStats};
use park_spatial::{DijkstraRouter, GraphRouteProvider};
use park_visitor::{VisitorKind, VisitorStore};

use layout::build_layout;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64   = 7;
const OPENING_HOURS:         u64   = 6;
const TICK_DURATION_SECS:    u32   = 60;  // 1 tick = 1 minute
const OUTPUT_INTERVAL_TICKS: u64   = 30;
const WALK_TICKS_PER_NODE:   u64   = 2;
const WAVES:                 usize = 3;
const VISITORS_PER_WAVE:     usize = 12;
const WAVE_GAP_TICKS:        u64   = 45;
const MAX_RIDES_PER_VISITOR: usize = 3;

const NAMES: [&str; 12] = [
    "Ada", "Bo", "Cy", "Dee", "Eli", "Flo", "Gus", "Hal", "Ivy", "Jo", "Kit", "Lu",
];

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:        ParkOutputObserver<W>,
    run_rows:     usize,
    summary_rows: usize,
    snapshots:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: ParkOutputObserver<W>) -> Self {
        Self { inner, run_rows: 0, summary_rows: 0, snapshots: 0 }
    }
}

impl<W: OutputWriter> ParkObserver for CountingObserver<W> {
    fn on_run_completed(&mut self, ride: &Ride, run: &RunReport) {
        self.run_rows += 1;
        self.inner.on_run_completed(ride, run);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, rides: &[Ride], visitors: &VisitorStore) {
        self.snapshots += 1;
        self.inner.on_snapshot(tick, rides, visitors);
    }

    fn on_sim_end(&mut self, final_tick: Tick, finances: &Finances) {
        self.inner.on_sim_end(final_tick, finances);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== park-small — rust_park simulation ===");
    println!(
        "Visitors: {}  |  Hours: {OPENING_HOURS}  |  Seed: {SEED}",
        WAVES * VISITORS_PER_WAVE
    );
    println!();

    // 1. Ride catalogue.
    let table = match std::env::args().nth(1) {
        Some(path) => load_ride_table_csv(Path::new(&path))?,
        None => RideTable::builtin(),
    };
    println!("Ride table: {} subtypes", table.len());

    // 2. Footpaths.
    let (network, nodes) = build_layout();
    println!(
        "Footpaths: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    let provider =
        GraphRouteProvider::new(network, DijkstraRouter).with_max_rides(MAX_RIDES_PER_VISITOR);

    // 3. Park config.
    let config = ParkConfig {
        start_unix_secs:       1_700_038_800, // fixed reference 09:00 UTC opening
        tick_duration_secs:    TICK_DURATION_SECS,
        total_ticks:           OPENING_HOURS * 60,
        seed:                  SEED,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        walk_ticks_per_node:   WALK_TICKS_PER_NODE,
    };
    let mut park = ParkBuilder::new(config, table, provider).build()?;

    // 4. Rides.  The corner lot gets whatever the park's chooser picks.
    park.place_ride(TileCoord::new(3, 0), nodes.coaster, Some("rollercoaster"))?;
    park.place_ride(TileCoord::new(1, -1), nodes.wheel, Some("ferris-wheel"))?;
    park.place_ride(TileCoord::new(2, 1), nodes.carousel, Some("carousel"))?;
    park.place_ride(TileCoord::new(0, 1), nodes.corner, None)?;
    println!("Rides placed: {}  ({})", park.rides().len(), park.finances);
    println!();

    // 5. Output.
    std::fs::create_dir_all("output/park-small")?;
    let writer = CsvWriter::new(Path::new("output/park-small"))?;
    let mut obs = CountingObserver::new(ParkOutputObserver::new(writer));

    // 6. Arrival waves, then run to closing.
    let gate_tile = TileCoord::new(0, 0);
    let mut rng = SimRng::new(SEED);
    let t0 = Instant::now();
    for wave in 0..WAVES {
        for i in 0..VISITORS_PER_WAVE {
            let kind = match rng.gen_range(0..10) {
                0..=5 => VisitorKind::Adult,
                6..=8 => VisitorKind::Kid,
                _     => VisitorKind::Elder,
            };
            let name = format!("{} #{}", NAMES[i % NAMES.len()], wave + 1);
            park.admit_visitor(name, kind, gate_tile, nodes.gate)?;
        }
        info!("wave {} admitted at {}", wave + 1, park.clock);
        park.run_ticks(WAVE_GAP_TICKS, &mut obs)?;
    }
    park.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ride_runs.csv       : {} rows", obs.run_rows);
    println!("  ride_snapshots.csv  : {} snapshots", obs.snapshots);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();
    println!(
        "Visitors left: {}  |  stranded: {}  |  still inside: {}",
        park.departed(),
        park.stranded(),
        park.visitors.len()
    );
    println!("Finances: {}", park.finances);
    println!();

    // 8. Ride info panels.
    for ride in park.rides() {
        println!("{}", ride.summary(&park.visitors));
    }

    Ok(())
}
