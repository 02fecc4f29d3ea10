//! Splitting a found path into per-turn movement segments.

use hexnav_core::CellId;

use crate::context::PathfindingContext;
use crate::result::PathResult;
use crate::traits::HexGraph;

/// A path broken into turn-sized segments.
///
/// Consecutive segments share their boundary cell: each segment after the
/// first starts where the previous one ended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiTurnPathResult {
    segments: Vec<Vec<CellId>>,
    cost_per_turn: Vec<i32>,
    turn_endpoints: Vec<CellId>,
    total_cost: i32,
}

impl MultiTurnPathResult {
    /// One cell sequence per turn.
    #[inline]
    pub fn segments(&self) -> &[Vec<CellId>] {
        &self.segments
    }

    /// Movement spent in each turn, parallel to [`segments`](Self::segments).
    #[inline]
    pub fn cost_per_turn(&self) -> &[i32] {
        &self.cost_per_turn
    }

    /// Where the unit stands at the end of each turn.
    #[inline]
    pub fn turn_endpoints(&self) -> &[CellId] {
        &self.turn_endpoints
    }

    #[inline]
    pub fn total_turns(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn total_cost(&self) -> i32 {
        self.total_cost
    }

    /// The full path again, with shared boundary cells listed once.
    pub fn flatten(&self) -> Vec<CellId> {
        let mut out: Vec<CellId> = Vec::new();
        for seg in &self.segments {
            let skip = usize::from(!out.is_empty());
            out.extend(seg.iter().skip(skip));
        }
        out
    }
}

/// Break `path` into segments that each fit within `movement_per_turn`.
///
/// Step costs come from `context.effective_cost`, so pass the context the
/// path was searched with or the totals will not line up. A step that
/// overflows the turn always closes it, even a turn with nothing spent yet,
/// so a first step dearer than a whole turn leaves a zero-cost first turn.
/// `movement_per_turn` below 1 is treated as 1. A failed result splits into
/// zero turns.
pub fn split_into_turns(
    graph: &dyn HexGraph,
    path: &PathResult,
    movement_per_turn: i32,
    context: &PathfindingContext,
) -> MultiTurnPathResult {
    let cells = path.path();
    let Some(&first) = cells.first() else {
        return MultiTurnPathResult::default();
    };
    let budget = movement_per_turn.max(1);

    let mut segments = Vec::new();
    let mut cost_per_turn = Vec::new();
    let mut current = vec![first];
    let mut turn_cost = 0;

    for step in cells.windows(2) {
        let (prev, next) = (step[0], step[1]);
        let Some(cell) = graph.cell(next) else {
            panic!("split_into_turns: path cell {next} is not on this map");
        };
        let cost = context.effective_cost(cell);
        if turn_cost + cost > budget {
            segments.push(std::mem::replace(&mut current, vec![prev]));
            cost_per_turn.push(turn_cost);
            turn_cost = 0;
        }
        current.push(next);
        turn_cost += cost;
    }
    if current.len() > 1 || segments.is_empty() {
        segments.push(current);
        cost_per_turn.push(turn_cost);
    }

    let turn_endpoints: Vec<CellId> = segments.iter().filter_map(|s| s.last().copied()).collect();
    let total_cost: i32 = cost_per_turn.iter().sum();
    if total_cost != path.total_cost() {
        log::warn!(
            "split_into_turns: segment costs sum to {total_cost}, path reported {}",
            path.total_cost()
        );
    }
    log::debug!(
        "split {} cells into {} turns of {budget}",
        cells.len(),
        segments.len()
    );

    MultiTurnPathResult {
        segments,
        cost_per_turn,
        turn_endpoints,
        total_cost,
    }
}
