use std::time::Instant;

use hexnav_core::{CellId, Cube, hex::cube_distance};

use crate::context::PathfindingContext;
use crate::queue::IndexedPriorityQueue;
use crate::result::{PathDiagnostics, PathFailure, PathResult};
use crate::state::SearchSpace;
use crate::traits::{HexGraph, PathfindingAlgorithm};

/// A* over a hex map.
///
/// Owns its per-cell [`SearchSpace`], open set and neighbor buffer, so
/// repeated searches reuse their allocations. One instance runs one search
/// at a time; use one instance per thread to search a shared map in
/// parallel.
#[derive(Debug, Default)]
pub struct AStar {
    space: SearchSpace,
    open: IndexedPriorityQueue<CellId>,
    nbuf: Vec<CellId>,
}

/// Hex distance between two cells: `(|dx| + |dy| + |dz|) / 2`.
///
/// Admissible because every step costs at least 1.
#[inline]
pub fn heuristic(from: Cube, to: Cube) -> i32 {
    cube_distance(from, to)
}

/// Run a one-off A* search with a fresh [`AStar`].
pub fn find_path(
    graph: &dyn HexGraph,
    start: CellId,
    goal: CellId,
    context: &PathfindingContext,
) -> PathResult {
    AStar::new().find_path(graph, start, goal, context)
}

impl AStar {
    pub fn new() -> Self {
        Self {
            space: SearchSpace::default(),
            open: IndexedPriorityQueue::new(),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Pre-size the caches for a map of `cells` cells.
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            space: SearchSpace::new(cells),
            open: IndexedPriorityQueue::with_capacity(cells.min(1024)),
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Per-cell state left behind by the last search.
    #[inline]
    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    fn diagnostics(&self, context: &PathfindingContext) -> Option<PathDiagnostics> {
        if !context.enable_diagnostics {
            return None;
        }
        let mut d = PathDiagnostics::default();
        for (id, s) in self.space.visited() {
            d.cost_so_far.insert(id, s.g_cost);
            if let Some(p) = s.predecessor {
                d.came_from.insert(id, p);
            }
        }
        Some(d)
    }

    fn reconstruct(&self, goal: CellId) -> Vec<CellId> {
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            path.push(id);
            cur = self.space.get(id).predecessor;
        }
        path.reverse();
        path
    }
}

impl PathfindingAlgorithm for AStar {
    fn find_path(
        &mut self,
        graph: &dyn HexGraph,
        start: CellId,
        goal: CellId,
        context: &PathfindingContext,
    ) -> PathResult {
        let started = Instant::now();
        let reject = |reason: PathFailure| {
            log::debug!("astar {start} -> {goal}: rejected, {reason}");
            PathResult::failure(reason, 0, started.elapsed(), None)
        };

        let Some(start_cell) = graph.cell(start) else {
            return reject(PathFailure::InvalidStart);
        };
        let Some(goal_cell) = graph.cell(goal) else {
            return reject(PathFailure::InvalidGoal);
        };
        if start == goal {
            let diagnostics = context.enable_diagnostics.then(|| PathDiagnostics {
                cost_so_far: [(start, 0)].into_iter().collect(),
                ..PathDiagnostics::default()
            });
            return PathResult::success(vec![start], 0, 0, started.elapsed(), diagnostics);
        }
        if !context.is_valid_destination(goal, goal_cell) {
            return reject(PathFailure::InvalidDestination);
        }
        if context.require_explored && !goal_cell.explored {
            return reject(PathFailure::GoalUnexplored);
        }

        self.space.reset(graph.cell_count());
        self.open.clear();

        let goal_cube = goal_cell.coord.cube();
        {
            let s = self.space.get_mut(start);
            s.g_cost = 0;
            s.h_cost = heuristic(start_cell.coord.cube(), goal_cube);
            s.in_open_set = true;
            let f = s.f_cost();
            self.open.enqueue(start, f);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut explored = 0usize;

        let outcome = 'search: loop {
            if self.open.is_empty() {
                break 'search Err(PathFailure::NoPath);
            }
            if explored >= context.max_search_nodes {
                break 'search Err(PathFailure::NodeLimitExceeded {
                    limit: context.max_search_nodes,
                });
            }

            let current = self.open.dequeue();
            let current_g = {
                let s = self.space.get_mut(current);
                s.in_open_set = false;
                s.in_closed_set = true;
                s.g_cost
            };
            explored += 1;
            log::trace!("astar expand {current} g={current_g}");

            if current == goal {
                break 'search Ok(current_g);
            }

            nbuf.clear();
            graph.neighbors(current, &mut nbuf);

            for &n in nbuf.iter() {
                let Some(cell) = graph.cell(n) else {
                    continue;
                };
                if self.space.get(n).in_closed_set || !context.can_enter(n, cell, n == goal) {
                    continue;
                }
                let tentative_g = current_g.saturating_add(context.effective_cost(cell));

                let s = self.space.get_mut(n);
                if s.in_open_set && tentative_g >= s.g_cost {
                    continue;
                }
                s.g_cost = tentative_g;
                s.h_cost = heuristic(cell.coord.cube(), goal_cube);
                s.predecessor = Some(current);
                let f = s.f_cost();
                if s.in_open_set {
                    self.open.update_priority(&n, f);
                } else {
                    s.in_open_set = true;
                    self.open.enqueue(n, f);
                }
            }
        };

        self.nbuf = nbuf;
        let diagnostics = self.diagnostics(context);

        let cost = match outcome {
            Ok(cost) => cost,
            Err(reason) => {
                log::debug!("astar {start} -> {goal}: {reason} after {explored} nodes");
                return PathResult::failure(reason, explored, started.elapsed(), diagnostics);
            }
        };

        if context.has_movement_limit() && cost > context.max_movement_points {
            let reason = PathFailure::Unaffordable {
                cost,
                budget: context.max_movement_points,
            };
            log::debug!("astar {start} -> {goal}: {reason}");
            return PathResult::failure(reason, explored, started.elapsed(), diagnostics);
        }

        let path = self.reconstruct(goal);
        log::debug!(
            "astar {start} -> {goal}: {} cells, cost {cost}, {explored} nodes",
            path.len()
        );
        PathResult::success(path, cost, explored, started.elapsed(), diagnostics)
    }
}
