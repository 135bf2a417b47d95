//! `VisitorQueue` — the boarding side of a ride.

use std::collections::VecDeque;

use park_core::VisitorId;

/// Strict FIFO of visitors waiting to board.
///
/// There is no removal other than [`take_front`](Self::take_front) (boarding)
/// and [`drain_all`](Self::drain_all) (ride disposal).
#[derive(Debug, Clone, Default)]
pub struct VisitorQueue {
    inner: VecDeque<VisitorId>,
}

impl VisitorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arriving visitor at the back.
    pub fn push_back(&mut self, visitor: VisitorId) {
        self.inner.push_back(visitor);
    }

    /// Remove and return up to `n` visitors from the front, earliest first.
    pub fn take_front(&mut self, n: usize) -> Vec<VisitorId> {
        let n = n.min(self.inner.len());
        self.inner.drain(..n).collect()
    }

    /// Remove everyone, earliest first.
    pub fn drain_all(&mut self) -> Vec<VisitorId> {
        self.inner.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, visitor: VisitorId) -> bool {
        self.inner.contains(&visitor)
    }

    /// Iterator in boarding order.
    pub fn iter(&self) -> impl Iterator<Item = VisitorId> + '_ {
        self.inner.iter().copied()
    }
}
