use hexnav_core::{CellId, Cube, HexCell, HexGrid};

use crate::context::PathfindingContext;
use crate::result::PathResult;

/// The map a search runs over: cell lookup and hex adjacency.
pub trait HexGraph {
    /// Number of cells. Valid handles are `CellId(0)..CellId(cell_count())`.
    fn cell_count(&self) -> usize;

    /// The cell behind a handle, or `None` if the handle is not on this map.
    fn cell(&self, id: CellId) -> Option<&HexCell>;

    /// The handle of the cell at a cube coordinate, if it lies on this map.
    fn id_at_cube(&self, c: Cube) -> Option<CellId>;

    /// Append the (at most six) neighbors of `id` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, id: CellId, buf: &mut Vec<CellId>);
}

/// A single-pair pathfinding strategy.
pub trait PathfindingAlgorithm {
    /// Search for a path from `start` to `goal` under the rules in `context`.
    ///
    /// Every expected failure (bad endpoints, no path, node limit, budget)
    /// is reported through the returned [`PathResult`], never by panicking.
    fn find_path(
        &mut self,
        graph: &dyn HexGraph,
        start: CellId,
        goal: CellId,
        context: &PathfindingContext,
    ) -> PathResult;
}

impl HexGraph for HexGrid {
    #[inline]
    fn cell_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn cell(&self, id: CellId) -> Option<&HexCell> {
        HexGrid::cell(self, id)
    }

    #[inline]
    fn id_at_cube(&self, c: Cube) -> Option<CellId> {
        HexGrid::id_at_cube(self, c)
    }

    #[inline]
    fn neighbors(&self, id: CellId, buf: &mut Vec<CellId>) {
        HexGrid::neighbors(self, id, buf)
    }
}
