//! The [`HexCell`] type and its [`CellId`] handle.

use std::fmt;

use crate::hex::HexCoordinate;
use crate::terrain::Terrain;

/// Dense index of a cell inside its grid.
///
/// This is the identity of a cell: two handles are the same cell iff they
/// are equal. Search code stores these as non-owning back references.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub usize);

impl CellId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tile of a hex map: position, terrain and the traversal flags a
/// pathfinder reads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCell {
    pub coord: HexCoordinate,
    pub terrain: Terrain,
    /// A unit stands here.
    pub occupied: bool,
    /// A unit has claimed this tile for a pending move.
    pub reserved: bool,
    /// The tile has been revealed (not under fog of war).
    pub explored: bool,
}

impl HexCell {
    /// A free, unexplored cell.
    pub fn new(coord: HexCoordinate, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            occupied: false,
            reserved: false,
            explored: false,
        }
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.terrain.walkable
    }

    #[inline]
    pub fn movement_cost(&self) -> i32 {
        self.terrain.movement_cost
    }

    /// Set the occupied flag (builder).
    pub fn with_occupied(mut self, occupied: bool) -> Self {
        self.occupied = occupied;
        self
    }

    /// Set the reserved flag (builder).
    pub fn with_reserved(mut self, reserved: bool) -> Self {
        self.reserved = reserved;
        self
    }

    /// Set the explored flag (builder).
    pub fn with_explored(mut self, explored: bool) -> Self {
        self.explored = explored;
        self
    }
}
