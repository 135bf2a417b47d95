//! Plain data row types written by output backends.

/// One finished ride run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideRunRow {
    pub ride_id:    u32,
    pub subtype:    String,
    pub start_tick: u64,
    pub end_tick:   u64,
    pub riders:     u64,
    /// Ticket revenue of this run alone.
    pub revenue:    u64,
}

/// The state of one ride at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSnapshotRow {
    pub tick:    u64,
    pub ride_id: u32,
    pub subtype: String,
    /// `"idle"` or `"in operation"`.
    pub state:   &'static str,
    pub waiting: u64,
    pub loaded:  u64,
    /// Revenue accumulated by the ride so far.
    pub revenue: u64,
}

/// Park-wide head counts for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub waiting:        u64,
    pub riding:         u64,
    pub walking:        u64,
    /// Cumulative; includes stranded visitors removed by the park.
    pub departed:       u64,
    pub total_revenue:  u64,
}
