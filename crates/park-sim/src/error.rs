use thiserror::Error;

use park_core::{ParkError, RideId, TileCoord};
use park_ride::RideError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("park configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Lookup(#[from] ParkError),

    #[error("ride error: {0}")]
    Ride(#[from] RideError),

    #[error("tile {tile} is already occupied by {ride}")]
    TileOccupied {
        tile: TileCoord,
        ride: RideId,
    },
}

pub type SimResult<T> = Result<T, SimError>;
