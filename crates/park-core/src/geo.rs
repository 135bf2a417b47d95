//! Tile-grid and world-space geometry.
//!
//! The park is laid out on an integer tile grid.  Buildings and footpath
//! nodes each stand on one tile; visitors are drawn in continuous world
//! space where tile `(x, y)` maps to world `(x, z) = (x, y)`.

use std::fmt;

use crate::RideId;

/// A cell of the park's tile grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid distance (4-neighbourhood steps) between two tiles.
    #[inline]
    pub fn manhattan(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// World-space position of the tile's anchor point.
    #[inline]
    pub fn to_world(self) -> WorldPos {
        WorldPos::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point on the ground plane in world units.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance in world units.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// A ride together with the tile a visitor walks to in order to queue for it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideTile {
    pub ride: RideId,
    pub tile: TileCoord,
}
