//! `VisitorStore` — slot storage for every visitor currently in the park.

use park_core::{NodeId, ParkError, ParkResult, TileCoord, VisitorId};

use crate::{Owner, Visitor, VisitorKind};

/// Visitors indexed by `VisitorId`.
///
/// Ids are assigned sequentially and never reused, so a stale id held by a
/// ride after the visitor left resolves to `None` instead of to a stranger.
#[derive(Default)]
pub struct VisitorStore {
    slots: Vec<Option<Visitor>>,
    /// Cached live count for O(1) `len()`.
    live:  usize,
}

impl VisitorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pedestrian at `origin` and return its id.
    pub fn spawn(
        &mut self,
        name:          impl Into<String>,
        kind:          VisitorKind,
        origin:        NodeId,
        entrance_tile: TileCoord,
    ) -> VisitorId {
        let id = VisitorId(self.slots.len() as u32);
        self.slots.push(Some(Visitor::new(id, name, kind, origin, entrance_tile)));
        self.live += 1;
        id
    }

    #[inline]
    pub fn get(&self, id: VisitorId) -> Option<&Visitor> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: VisitorId) -> Option<&mut Visitor> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Like [`get_mut`](Self::get_mut) but reports a missing visitor as an error.
    pub fn try_get_mut(&mut self, id: VisitorId) -> ParkResult<&mut Visitor> {
        self.get_mut(id).ok_or(ParkError::VisitorNotFound(id))
    }

    /// Remove a visitor from the park, returning it.
    pub fn remove(&mut self, id: VisitorId) -> Option<Visitor> {
        let removed = self.slots.get_mut(id.index()).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    #[inline]
    pub fn contains(&self, id: VisitorId) -> bool {
        self.get(id).is_some()
    }

    /// Number of visitors currently in the park.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterator over live visitors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Visitor> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Mutable iterator over live visitors in ascending id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Visitor> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Ids of live visitors owned by `owner`, ascending.
    pub fn ids_owned_by(&self, owner: Owner) -> Vec<VisitorId> {
        self.iter().filter(|v| v.owner() == owner).map(|v| v.id).collect()
    }

    /// Pedestrians with no reachable destination.  The park removes these
    /// at the end of every tick.
    pub fn stranded(&self) -> Vec<VisitorId> {
        self.iter()
            .filter(|v| v.owner().is_pedestrian() && v.destination.is_none())
            .map(|v| v.id)
            .collect()
    }

    /// `(walking, queued, riding)` head counts.
    pub fn owner_counts(&self) -> (usize, usize, usize) {
        self.iter().fold((0, 0, 0), |(w, q, r), v| match v.owner() {
            Owner::Pedestrian => (w + 1, q, r),
            Owner::Queued(_)  => (w, q + 1, r),
            Owner::Riding(_)  => (w, q, r + 1),
        })
    }
}
