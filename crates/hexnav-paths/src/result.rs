//! Search outcomes: [`PathResult`] and [`PathFailure`].

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use hexnav_core::CellId;

/// Why a search produced no usable path.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathFailure {
    /// The start handle is not a cell of the searched map.
    InvalidStart,
    /// The goal handle is not a cell of the searched map.
    InvalidGoal,
    /// The goal is unwalkable or blocked by the obstacle predicate.
    InvalidDestination,
    /// The goal is under fog of war and the context requires explored cells.
    GoalUnexplored,
    /// The node cap was hit before the goal was reached.
    NodeLimitExceeded { limit: usize },
    /// A path exists but costs more than the movement budget.
    Unaffordable { cost: i32, budget: i32 },
    /// Every reachable cell was expanded without reaching the goal.
    NoPath,
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathFailure::InvalidStart => write!(f, "start cell is not on the map"),
            PathFailure::InvalidGoal => write!(f, "goal cell is not on the map"),
            PathFailure::InvalidDestination => write!(f, "goal cell is not a valid destination"),
            PathFailure::GoalUnexplored => write!(f, "goal cell has not been explored"),
            PathFailure::NodeLimitExceeded { limit } => {
                write!(f, "search node limit of {limit} reached")
            }
            PathFailure::Unaffordable { cost, budget } => write!(
                f,
                "path costs {cost} but only {budget} movement points are available"
            ),
            PathFailure::NoPath => write!(f, "no path exists"),
        }
    }
}

impl Error for PathFailure {}

/// Cost-so-far and predecessor of every cell a search reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathDiagnostics {
    pub cost_so_far: HashMap<CellId, i32>,
    pub came_from: HashMap<CellId, CellId>,
}

/// The outcome of one search. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    path: Vec<CellId>,
    total_cost: i32,
    nodes_explored: usize,
    elapsed: Duration,
    failure: Option<PathFailure>,
    diagnostics: Option<PathDiagnostics>,
}

impl PathResult {
    /// A found path, ordered start → goal.
    pub fn success(
        path: Vec<CellId>,
        total_cost: i32,
        nodes_explored: usize,
        elapsed: Duration,
        diagnostics: Option<PathDiagnostics>,
    ) -> Self {
        Self {
            path,
            total_cost,
            nodes_explored,
            elapsed,
            failure: None,
            diagnostics,
        }
    }

    /// A failed search with whatever statistics were gathered.
    pub fn failure(
        reason: PathFailure,
        nodes_explored: usize,
        elapsed: Duration,
        diagnostics: Option<PathDiagnostics>,
    ) -> Self {
        Self {
            path: Vec::new(),
            total_cost: 0,
            nodes_explored,
            elapsed,
            failure: Some(reason),
            diagnostics,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Cells from start to goal inclusive; empty on failure.
    #[inline]
    pub fn path(&self) -> &[CellId] {
        &self.path
    }

    #[inline]
    pub fn total_cost(&self) -> i32 {
        self.total_cost
    }

    #[inline]
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Present iff the search failed.
    #[inline]
    pub fn failure_reason(&self) -> Option<&PathFailure> {
        self.failure.as_ref()
    }

    #[inline]
    pub fn diagnostics(&self) -> Option<&PathDiagnostics> {
        self.diagnostics.as_ref()
    }

    /// Number of cells on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn start(&self) -> Option<CellId> {
        self.path.first().copied()
    }

    pub fn goal(&self) -> Option<CellId> {
        self.path.last().copied()
    }

    /// Convert into the path, or the failure reason.
    pub fn into_result(self) -> Result<Vec<CellId>, PathFailure> {
        match self.failure {
            None => Ok(self.path),
            Some(reason) => Err(reason),
        }
    }
}
