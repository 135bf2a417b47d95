//! Ownership tag for a visitor's navigation state.

use std::fmt;

use park_core::RideId;

/// The subsystem currently allowed to mutate a visitor's navigation fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    /// Walking the footpaths; the park's movement phase owns it.
    #[default]
    Pedestrian,
    /// Waiting in the queue of the given ride.
    Queued(RideId),
    /// Inside the given ride for its current run.
    Riding(RideId),
}

impl Owner {
    /// The ride holding this visitor, if any.
    #[inline]
    pub fn ride(self) -> Option<RideId> {
        match self {
            Owner::Pedestrian => None,
            Owner::Queued(r) | Owner::Riding(r) => Some(r),
        }
    }

    #[inline]
    pub fn is_pedestrian(self) -> bool {
        matches!(self, Owner::Pedestrian)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Pedestrian => f.write_str("pedestrian"),
            Owner::Queued(r)  => write!(f, "queued at {r}"),
            Owner::Riding(r)  => write!(f, "riding {r}"),
        }
    }
}
