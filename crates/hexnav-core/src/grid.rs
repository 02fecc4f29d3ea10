//! The [`HexGrid`] type — a rectangular hex map of [`HexCell`]s.
//!
//! Cells are stored row-major by offset coordinate, so a [`CellId`] is simply
//! `row * width + col`. The grid owns every cell; callers hold `CellId`s.

use std::error::Error;
use std::fmt;

use crate::cell::{CellId, HexCell};
use crate::hex::{Cube, HexCoordinate, Offset, Orientation, cube_to_offset};
use crate::terrain::Terrain;

/// Error returned by [`HexGrid::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No rows, or a row with no tiles.
    Empty,
    /// Row `row` has a different length from the first row.
    Ragged { row: usize, expected: usize, found: usize },
    /// Tile character not in the legend.
    UnknownTile { ch: char, col: usize, row: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "map has no tiles"),
            ParseError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} tiles, expected {expected}"),
            ParseError::UnknownTile { ch, col, row } => {
                write!(f, "unknown tile {ch:?} at column {col}, row {row}")
            }
        }
    }
}

impl Error for ParseError {}

/// A `width × height` hex map in offset layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexGrid {
    width: i32,
    height: i32,
    orientation: Orientation,
    cells: Vec<HexCell>,
}

/// Cell count of a `width` × `height` map, widened before multiplying.
fn area(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

impl HexGrid {
    /// Create a grid of the given dimensions, every cell using `terrain`.
    pub fn new(width: i32, height: i32, orientation: Orientation, terrain: Terrain) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut cells = Vec::with_capacity(area(width, height));
        for row in 0..height {
            for col in 0..width {
                let coord = HexCoordinate::from_offset(Offset::new(col, row), orientation);
                cells.push(HexCell::new(coord, terrain.clone()));
            }
        }
        Self {
            width,
            height,
            orientation,
            cells,
        }
    }

    /// Build a grid from a text map, one string per row.
    ///
    /// Legend: `.` plains (1), `f` forest (2), `h` hills (3), `~` water
    /// (blocked), `#` wall (blocked), `1`-`9` unnamed terrain of that cost.
    /// Whitespace is ignored. Every cell starts explored.
    pub fn from_rows(orientation: Orientation, rows: &[&str]) -> Result<Self, ParseError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let width = parsed.first().map_or(0, |r| r.len());
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut cells = Vec::with_capacity(width * parsed.len());
        for (row, tiles) in parsed.iter().enumerate() {
            if tiles.len() != width {
                return Err(ParseError::Ragged {
                    row,
                    expected: width,
                    found: tiles.len(),
                });
            }
            for (col, &ch) in tiles.iter().enumerate() {
                let terrain = match ch {
                    '.' => Terrain::open("plains", 1),
                    'f' => Terrain::open("forest", 2),
                    'h' => Terrain::open("hills", 3),
                    '~' => Terrain::blocked("water"),
                    '#' => Terrain::blocked("wall"),
                    '1'..='9' => Terrain::unnamed(ch as i32 - '0' as i32),
                    _ => return Err(ParseError::UnknownTile { ch, col, row }),
                };
                let coord =
                    HexCoordinate::from_offset(Offset::new(col as i32, row as i32), orientation);
                cells.push(HexCell::new(coord, terrain).with_explored(true));
            }
        }

        Ok(Self {
            width: width as i32,
            height: parsed.len() as i32,
            orientation,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the offset coordinate lies on the map.
    #[inline]
    pub fn contains(&self, o: Offset) -> bool {
        o.col >= 0 && o.row >= 0 && o.col < self.width && o.row < self.height
    }

    /// Cell handle at an offset coordinate, or `None` if off the map.
    #[inline]
    pub fn id_at(&self, o: Offset) -> Option<CellId> {
        if !self.contains(o) {
            return None;
        }
        Some(CellId((o.row * self.width + o.col) as usize))
    }

    /// Cell handle at a cube coordinate, or `None` if off the map.
    #[inline]
    pub fn id_at_cube(&self, c: Cube) -> Option<CellId> {
        self.id_at(cube_to_offset(c, self.orientation))
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id.0)
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut HexCell> {
        self.cells.get_mut(id.0)
    }

    /// Cell at an offset coordinate.
    pub fn cell_at(&self, o: Offset) -> Option<&HexCell> {
        self.id_at(o).and_then(|id| self.cell(id))
    }

    /// Mutable cell at an offset coordinate.
    pub fn cell_at_mut(&mut self, o: Offset) -> Option<&mut HexCell> {
        let id = self.id_at(o)?;
        self.cell_mut(id)
    }

    /// Append the on-map neighbors of `id` into `buf`. The caller clears
    /// `buf` before calling. Off-map neighbors are skipped, so at most six
    /// handles are appended.
    pub fn neighbors(&self, id: CellId, buf: &mut Vec<CellId>) {
        let Some(cell) = self.cell(id) else {
            return;
        };
        for n in cell.coord.cube().neighbors() {
            if let Some(nid) = self.id_at_cube(n) {
                buf.push(nid);
            }
        }
    }

    /// Iterate every cell with its handle, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &HexCell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// Iterate every cell mutably, in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CellId, &mut HexCell)> {
        self.cells.iter_mut().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// Mark every cell explored.
    pub fn reveal_all(&mut self) {
        for c in &mut self.cells {
            c.explored = true;
        }
    }

    /// Replace the terrain of the cell at `o`. Does nothing if off the map.
    pub fn set_terrain(&mut self, o: Offset, terrain: Terrain) {
        if let Some(c) = self.cell_at_mut(o) {
            c.terrain = terrain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_row_major() {
        let g = HexGrid::new(4, 3, Orientation::PointyTop, Terrain::default());
        assert_eq!(g.len(), 12);
        assert_eq!(g.id_at(Offset::new(0, 0)), Some(CellId(0)));
        assert_eq!(g.id_at(Offset::new(3, 2)), Some(CellId(11)));
        assert_eq!(g.id_at(Offset::new(4, 0)), None);
        assert_eq!(g.id_at(Offset::new(0, -1)), None);
        let c = g.cell(CellId(5)).unwrap();
        assert_eq!(c.coord.offset(), Offset::new(1, 1));
    }

    #[test]
    fn degenerate_dimensions_are_empty() {
        let g = HexGrid::new(0, i32::MAX, Orientation::FlatTop, Terrain::default());
        assert!(g.is_empty());
        let g = HexGrid::new(-3, 4, Orientation::PointyTop, Terrain::default());
        assert_eq!((g.width(), g.height(), g.len()), (0, 4, 0));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn area_does_not_wrap_past_i32() {
        assert_eq!(area(70_000, 70_000), 4_900_000_000);
        assert_eq!(area(i32::MAX, 2), 2 * i32::MAX as usize);
        assert_eq!(area(-1, 10), 0);
    }

    #[test]
    fn interior_cell_has_six_neighbors() {
        for orientation in [Orientation::FlatTop, Orientation::PointyTop] {
            let g = HexGrid::new(5, 5, orientation, Terrain::default());
            let id = g.id_at(Offset::new(2, 2)).unwrap();
            let mut buf = Vec::new();
            g.neighbors(id, &mut buf);
            assert_eq!(buf.len(), 6);
            let here = g.cell(id).unwrap().coord;
            for n in &buf {
                assert_eq!(here.distance(&g.cell(*n).unwrap().coord), 1);
            }
        }
    }

    #[test]
    fn corner_cell_skips_off_map_neighbors() {
        let g = HexGrid::new(5, 5, Orientation::PointyTop, Terrain::default());
        let mut buf = Vec::new();
        g.neighbors(CellId(0), &mut buf);
        // Even row 0, col 0 in odd-r: only east and south-east remain.
        assert_eq!(buf.len(), 2);
        assert!(buf.contains(&g.id_at(Offset::new(1, 0)).unwrap()));
        assert!(buf.contains(&g.id_at(Offset::new(0, 1)).unwrap()));
    }

    #[test]
    fn neighbors_are_symmetric() {
        let g = HexGrid::new(6, 7, Orientation::FlatTop, Terrain::default());
        let mut buf = Vec::new();
        let mut back = Vec::new();
        for (id, _) in g.iter() {
            buf.clear();
            g.neighbors(id, &mut buf);
            for &n in &buf {
                back.clear();
                g.neighbors(n, &mut back);
                assert!(back.contains(&id), "{id} -> {n} not symmetric");
            }
        }
    }

    #[test]
    fn from_rows_legend() {
        let g = HexGrid::from_rows(Orientation::PointyTop, &[". f h", "~ # 5"]).unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        let c = g.cell_at(Offset::new(1, 0)).unwrap();
        assert_eq!(c.terrain.name(), Some("forest"));
        assert_eq!(c.movement_cost(), 2);
        assert!(c.explored);
        assert!(!g.cell_at(Offset::new(0, 1)).unwrap().is_walkable());
        let five = g.cell_at(Offset::new(2, 1)).unwrap();
        assert_eq!(five.terrain.name(), None);
        assert_eq!(five.movement_cost(), 5);
    }

    #[test]
    fn from_rows_errors() {
        assert_eq!(
            HexGrid::from_rows(Orientation::PointyTop, &[]),
            Err(ParseError::Empty)
        );
        assert_eq!(
            HexGrid::from_rows(Orientation::PointyTop, &["...", ".."]),
            Err(ParseError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        let err = HexGrid::from_rows(Orientation::PointyTop, &["..x"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownTile {
                ch: 'x',
                col: 2,
                row: 0
            }
        );
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn mutation_helpers() {
        let mut g = HexGrid::new(3, 3, Orientation::PointyTop, Terrain::default());
        assert!(g.iter().all(|(_, c)| !c.explored));
        g.reveal_all();
        assert!(g.iter().all(|(_, c)| c.explored));
        g.set_terrain(Offset::new(1, 1), Terrain::blocked("wall"));
        assert!(!g.cell_at(Offset::new(1, 1)).unwrap().is_walkable());
        g.set_terrain(Offset::new(9, 9), Terrain::blocked("wall"));
    }
}
