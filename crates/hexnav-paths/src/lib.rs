//! A* pathfinding and turn planning for hex-tile strategy maps.
//!
//! The search runs over any map implementing [`HexGraph`] (the concrete
//! [`HexGrid`](hexnav_core::HexGrid) implements it) under the traversal rules
//! of a [`PathfindingContext`]:
//!
//! - **A\*** single-pair search ([`AStar`], or the one-shot [`find_path`])
//!   with an indexed binary-heap open set ([`IndexedPriorityQueue`]).
//! - **Turn splitting** of a found path into per-turn segments
//!   ([`split_into_turns`]).
//! - **Movement profiles** that populate a context ([`MovementProfile`]).
//!
//! Expected failures (no path, node limit, unaffordable path, bad endpoints)
//! come back as data in [`PathResult`]; only broken internal invariants panic.
//!
//! # Trait hierarchy
//!
//! | Trait | Role |
//! |---|---|
//! | [`HexGraph`] | map collaborator: cell lookup and adjacency |
//! | [`PathfindingAlgorithm`] | interchangeable search strategy |

mod astar;
mod context;
mod presets;
mod queue;
mod result;
mod state;
mod traits;
mod turns;

pub use astar::{AStar, find_path, heuristic};
pub use context::{
    DEFAULT_MAX_SEARCH_NODES, ObstaclePredicate, PathfindingContext, UNLIMITED_MOVEMENT,
};
pub use presets::MovementProfile;
pub use queue::IndexedPriorityQueue;
pub use result::{PathDiagnostics, PathFailure, PathResult};
pub use state::{SearchSpace, SearchState, UNVISITED};
pub use traits::{HexGraph, PathfindingAlgorithm};
pub use turns::{MultiTurnPathResult, split_into_turns};
