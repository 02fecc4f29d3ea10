//! **hexnav-core** — hex-tile map core types.
//!
//! This crate provides the geometry and map storage used by the *hexnav*
//! pathfinding crate: offset/axial/cube coordinates for flat-top and
//! pointy-top layouts, terrain descriptors, map cells carrying traversal
//! flags, and a rectangular [`HexGrid`].

pub mod cell;
pub mod grid;
pub mod hex;
pub mod terrain;

pub use cell::{CellId, HexCell};
pub use grid::{HexGrid, ParseError};
pub use hex::{Axial, Cube, HexCoordinate, Offset, Orientation};
pub use terrain::Terrain;
