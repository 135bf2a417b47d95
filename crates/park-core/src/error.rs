//! Park-wide error type.
//!
//! Sub-crates define their own error enums and wrap `ParkError` as one
//! variant (via `#[from]`) where a lookup failure has to surface.

use thiserror::Error;

use crate::{RideId, VisitorId};

/// Lookup failures shared by every `park-*` crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParkError {
    #[error("visitor {0} not found")]
    VisitorNotFound(VisitorId),

    #[error("ride {0} not found")]
    RideNotFound(RideId),
}

/// Shorthand result type for `park-core` lookups.
pub type ParkResult<T> = Result<T, ParkError>;
