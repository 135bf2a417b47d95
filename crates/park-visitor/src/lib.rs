//! `park-visitor` — the visitor entity and its storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`visitor`]   | `Visitor`, `VisitorKind`                                  |
//! | [`owner`]     | `Owner` — which subsystem may write a visitor's navigation |
//! | [`store`]     | `VisitorStore` — slot storage indexed by `VisitorId`      |
//!
//! # Single-writer discipline
//!
//! A visitor's navigation fields are written by exactly one subsystem at a
//! time: the pedestrian pool while walking, a ride while queued or riding.
//! The [`Owner`] tag records who that is, and every hand-over goes through
//! the transition methods on [`Visitor`] so an illegal hand-over is caught
//! at the point it is attempted.

pub mod owner;
pub mod store;
pub mod visitor;


pub use owner::Owner;
pub use store::VisitorStore;
pub use visitor::{Visitor, VisitorKind};
