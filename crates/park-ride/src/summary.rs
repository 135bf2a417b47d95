//! Human-readable ride info panel.

use std::fmt;

use park_core::RideId;

use crate::RideState;

/// Everything the info panel shows about one ride.  Built by
/// [`Ride::summary`][crate::Ride::summary]; the layout is a display concern
/// only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideSummary {
    pub id:                RideId,
    pub subtype:           String,
    pub thrill_level:      u8,
    pub installation_cost: u32,
    pub ticket_price:      u32,
    pub duration_mins:     u32,
    pub capacity:          u32,
    pub state:             RideState,
    pub revenue:           u64,
    /// Queued visitors, front of the queue first.
    pub waiting:           Vec<String>,
    /// Visitors on the current run.
    pub loaded:            Vec<String>,
}

impl fmt::Display for RideSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.id, self.subtype)?;
        writeln!(f, "  Thrill Level               {}", self.thrill_level)?;
        writeln!(f, "  Installation Cost          $ {}", self.installation_cost)?;
        writeln!(f, "  Ticket Price per Visitor   $ {}", self.ticket_price)?;
        writeln!(f, "  Ride Duration              {} mins", self.duration_mins)?;
        writeln!(f, "  Ride Capacity              {} pax", self.capacity)?;
        writeln!(f, "  Number of Waiting Visitors {} pax", self.waiting.len())?;
        writeln!(f, "  Number of Loaded Visitors  {} pax", self.loaded.len())?;
        writeln!(f, "  Ride Status                {}", self.state)?;
        writeln!(f, "  Revenue                    $ {}", self.revenue)?;
        writeln!(f, "  Waiting:")?;
        for name in &self.waiting {
            writeln!(f, "    - {name}")?;
        }
        writeln!(f, "  Loaded:")?;
        for name in &self.loaded {
            writeln!(f, "    - {name}")?;
        }
        Ok(())
    }
}
