//! Fluent builder for constructing a [`Park`].

use park_core::{Chooser, ParkConfig, SimRng, SystemWallClock, WallClock};
use park_ride::RideTable;
use park_spatial::RouteProvider;

use crate::{Park, SimError, SimResult};

/// Fluent builder for [`Park<P>`].
///
/// # Required inputs
///
/// - [`ParkConfig`] — total ticks, seed, tick duration, …
/// - [`RideTable`] — subtype attributes (e.g. [`RideTable::builtin`])
/// - `P: RouteProvider` — pathfinding (e.g. [`park_spatial::GraphRouteProvider`])
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                         |
/// |--------------------|---------------------------------|
/// | `.wall_clock(c)`   | `SystemWallClock`               |
/// | `.chooser(c)`      | `SimRng::new(config.seed)`      |
///
/// # Example
///
/// ```rust,ignore
/// let provider = GraphRouteProvider::new(network, DijkstraRouter);
/// let mut park = ParkBuilder::new(config, RideTable::builtin(), provider)
///     .wall_clock(FixedWallClock(0))
///     .build()?;
/// park.run(&mut NoopObserver)?;
/// ```
pub struct ParkBuilder<P: RouteProvider> {
    config:     ParkConfig,
    table:      RideTable,
    provider:   P,
    wall_clock: Option<Box<dyn WallClock>>,
    chooser:    Option<Box<dyn Chooser>>,
}

impl<P: RouteProvider> ParkBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: ParkConfig, table: RideTable, provider: P) -> Self {
        Self {
            config,
            table,
            provider,
            wall_clock: None,
            chooser:    None,
        }
    }

    /// Supply the clock used to stamp released visitors' walk cycles.
    pub fn wall_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.wall_clock = Some(Box::new(clock));
        self
    }

    /// Supply the chooser used when a ride is placed without a subtype.
    pub fn chooser(mut self, chooser: impl Chooser + 'static) -> Self {
        self.chooser = Some(Box::new(chooser));
        self
    }

    /// Validate the configuration and return a ready-to-run [`Park`].
    pub fn build(self) -> SimResult<Park<P>> {
        if self.config.tick_duration_secs == 0 {
            return Err(SimError::Config("tick_duration_secs must be positive".into()));
        }
        if self.config.walk_ticks_per_node == 0 {
            return Err(SimError::Config("walk_ticks_per_node must be positive".into()));
        }

        let chooser = self
            .chooser
            .unwrap_or_else(|| Box::new(SimRng::new(self.config.seed)));
        let wall_clock = self.wall_clock.unwrap_or_else(|| Box::new(SystemWallClock));

        Ok(Park::new(self.config, self.table, self.provider, wall_clock, chooser))
    }
}
