//! `park-ride` — a single attraction: queueing, batch loading, timed runs,
//! ticket revenue, and sending riders on to their next goal.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`config`]  | `RideAttributes`, `RideTable`, `load_ride_table_csv`           |
//! | [`queue`]   | `VisitorQueue` — FIFO boarding queue                           |
//! | [`ride`]    | `Ride`, `RideState`, `StepContext`, `StepOutcome`, `RunReport` |
//! | [`release`] | `ReleaseRouter`, `ReleaseDecision`, `ReleaseReport`            |
//! | [`summary`] | `RideSummary` — human-readable info panel                      |
//! | [`error`]   | `RideError`, `RideResult<T>`                                   |
//!
//! # State machine (summary)
//!
//! ```text
//!            waiting > 0 && capacity > 0
//!   Idle ───────────────────────────────▶ Operating
//!    ▲     load first min(waiting, cap)       │
//!    │                                        │ now >= last_run + duration
//!    └────────────────────────────────────────┘
//!       accrue price × riders, release riders
//! ```
//!
//! Both transitions are evaluated once per tick, idle first.  The completion
//! check only applies to a ride that was already operating when the tick
//! began, so a batch never boards and leaves in the same tick.

pub mod config;
pub mod error;
pub mod queue;
pub mod release;
pub mod ride;
pub mod summary;


pub use config::{load_ride_table_csv, load_ride_table_reader, RideAttributes, RideTable};
pub use error::{RideError, RideResult};
pub use queue::VisitorQueue;
pub use release::{ReleaseDecision, ReleaseReport, ReleaseRouter};
pub use ride::{DisposalReport, Ride, RideState, RunReport, StepContext, StepOutcome};
pub use summary::RideSummary;
