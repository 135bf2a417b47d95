use thiserror::Error;

use park_core::{ParkError, RideId, VisitorId};
use park_visitor::Owner;

#[derive(Debug, Error)]
pub enum RideError {
    #[error(transparent)]
    Lookup(#[from] ParkError),

    #[error("visitor {visitor} cannot queue for {ride}: currently {owner}")]
    VisitorBusy {
        visitor: VisitorId,
        ride:    RideId,
        owner:   Owner,
    },

    #[error("visitor {visitor} is {owner}, not a free pedestrian")]
    NotPedestrian {
        visitor: VisitorId,
        owner:   Owner,
    },

    #[error("route provider returned an empty path for visitor {0}")]
    EmptyRoute(VisitorId),

    #[error("ride table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RideResult<T> = Result<T, RideError>;
