//! Per-request traversal rules: [`PathfindingContext`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hexnav_core::{CellId, HexCell};

/// `max_movement_points` value meaning "no movement budget".
pub const UNLIMITED_MOVEMENT: i32 = -1;

/// Default hard cap on expanded cells per search.
pub const DEFAULT_MAX_SEARCH_NODES: usize = 10_000;

/// Caller-supplied blocker: returns `true` for cells the unit must not enter.
pub type ObstaclePredicate = Arc<dyn Fn(CellId, &HexCell) -> bool + Send + Sync>;

/// Traversal rules and budgets for one search request.
///
/// Read-only while a search runs. Cloning copies the multiplier map, so a
/// derived context never aliases its parent's; the obstacle predicate is
/// shared, being immutable.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindingContext {
    /// Budget a found path must fit in; [`UNLIMITED_MOVEMENT`] disables it.
    pub max_movement_points: i32,
    /// Expansions allowed before the search gives up. Always enforced.
    pub max_search_nodes: usize,
    /// Only walk through revealed cells.
    pub require_explored: bool,
    /// Walk through occupied cells. Occupants are not told apart yet, so this
    /// governs every occupied cell.
    pub allow_move_through_allies: bool,
    /// Reserved for hosts that tell occupants apart; not read by the search.
    pub allow_move_through_enemies: bool,
    /// Hint for host-side cost layers; not read by the search.
    pub prefer_high_ground: bool,
    /// Hint for host-side cost layers; not read by the search.
    pub avoid_enemy_zones: bool,
    /// Terrain name → multiplier on that terrain's base movement cost.
    pub terrain_cost_multipliers: HashMap<String, f32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub obstacle: Option<ObstaclePredicate>,
    /// Capture cost-so-far and predecessor maps in the result.
    pub enable_diagnostics: bool,
    /// Consumed by result caches layered on top of the search.
    pub enable_caching: bool,
}

impl Default for PathfindingContext {
    fn default() -> Self {
        Self {
            max_movement_points: UNLIMITED_MOVEMENT,
            max_search_nodes: DEFAULT_MAX_SEARCH_NODES,
            require_explored: false,
            allow_move_through_allies: false,
            allow_move_through_enemies: false,
            prefer_high_ground: false,
            avoid_enemy_zones: false,
            terrain_cost_multipliers: HashMap::new(),
            obstacle: None,
            enable_diagnostics: false,
            enable_caching: false,
        }
    }
}

impl fmt::Debug for PathfindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathfindingContext")
            .field("max_movement_points", &self.max_movement_points)
            .field("max_search_nodes", &self.max_search_nodes)
            .field("require_explored", &self.require_explored)
            .field("allow_move_through_allies", &self.allow_move_through_allies)
            .field("allow_move_through_enemies", &self.allow_move_through_enemies)
            .field("prefer_high_ground", &self.prefer_high_ground)
            .field("avoid_enemy_zones", &self.avoid_enemy_zones)
            .field("terrain_cost_multipliers", &self.terrain_cost_multipliers)
            .field("obstacle", &self.obstacle.as_ref().map(|_| "<predicate>"))
            .field("enable_diagnostics", &self.enable_diagnostics)
            .field("enable_caching", &self.enable_caching)
            .finish()
    }
}

impl PathfindingContext {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    pub fn with_max_movement_points(mut self, points: i32) -> Self {
        self.max_movement_points = points;
        self
    }

    pub fn with_max_search_nodes(mut self, nodes: usize) -> Self {
        self.max_search_nodes = nodes;
        self
    }

    pub fn with_require_explored(mut self, require: bool) -> Self {
        self.require_explored = require;
        self
    }

    pub fn with_move_through_allies(mut self, allow: bool) -> Self {
        self.allow_move_through_allies = allow;
        self
    }

    pub fn with_move_through_enemies(mut self, allow: bool) -> Self {
        self.allow_move_through_enemies = allow;
        self
    }

    pub fn with_terrain_multiplier(mut self, terrain: impl Into<String>, multiplier: f32) -> Self {
        self.terrain_cost_multipliers.insert(terrain.into(), multiplier);
        self
    }

    pub fn with_obstacle(
        mut self,
        obstacle: impl Fn(CellId, &HexCell) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.obstacle = Some(Arc::new(obstacle));
        self
    }

    pub fn with_diagnostics(mut self, enable: bool) -> Self {
        self.enable_diagnostics = enable;
        self
    }

    // -----------------------------------------------------------------------
    // Rules
    // -----------------------------------------------------------------------

    #[inline]
    pub fn has_movement_limit(&self) -> bool {
        self.max_movement_points >= 0
    }

    /// Cost multiplier for a terrain name; 1.0 when unnamed or unlisted.
    pub fn terrain_multiplier(&self, terrain: Option<&str>) -> f32 {
        terrain
            .and_then(|name| self.terrain_cost_multipliers.get(name))
            .copied()
            .unwrap_or(1.0)
    }

    /// Cost of stepping onto `cell`: base terrain cost times its multiplier,
    /// rounded, and never below 1.
    pub fn effective_cost(&self, cell: &HexCell) -> i32 {
        let multiplier = self.terrain_multiplier(cell.terrain.name());
        let scaled = (cell.movement_cost() as f32 * multiplier).round();
        // NaN casts to 0 and is lifted with the rest.
        (scaled as i32).max(1)
    }

    #[inline]
    pub fn is_obstacle(&self, id: CellId, cell: &HexCell) -> bool {
        self.obstacle.as_ref().is_some_and(|blocked| blocked(id, cell))
    }

    /// Whether a path may end on `cell`. Occupation and reservation do not
    /// matter here, so a unit can path onto a target's tile.
    pub fn is_valid_destination(&self, id: CellId, cell: &HexCell) -> bool {
        cell.is_walkable() && !self.is_obstacle(id, cell)
    }

    /// Whether a search may step onto `cell`. The goal is exempt from the
    /// occupation and reservation rules.
    pub fn can_enter(&self, id: CellId, cell: &HexCell, is_goal: bool) -> bool {
        if self.is_obstacle(id, cell) || !cell.is_walkable() {
            return false;
        }
        if cell.occupied && !is_goal && !self.allow_move_through_allies {
            return false;
        }
        if cell.reserved && !is_goal {
            return false;
        }
        if self.require_explored && !cell.explored {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexnav_core::{HexCoordinate, Offset, Orientation, Terrain};

    fn cell(terrain: Terrain) -> HexCell {
        HexCell::new(
            HexCoordinate::from_offset(Offset::new(0, 0), Orientation::PointyTop),
            terrain,
        )
        .with_explored(true)
    }

    #[test]
    fn defaults() {
        let ctx = PathfindingContext::default();
        assert!(!ctx.has_movement_limit());
        assert_eq!(ctx.max_search_nodes, DEFAULT_MAX_SEARCH_NODES);
        assert!(ctx.obstacle.is_none());
    }

    #[test]
    fn multipliers_scale_and_round() {
        let ctx = PathfindingContext::new()
            .with_terrain_multiplier("forest", 1.5)
            .with_terrain_multiplier("plains", 0.5)
            .with_terrain_multiplier("road", 0.1);
        assert_eq!(ctx.effective_cost(&cell(Terrain::open("forest", 2))), 3);
        assert_eq!(ctx.effective_cost(&cell(Terrain::open("forest", 3))), 5);
        // 0.5 rounds up to 1, 0.1 is lifted to 1.
        assert_eq!(ctx.effective_cost(&cell(Terrain::open("plains", 1))), 1);
        assert_eq!(ctx.effective_cost(&cell(Terrain::open("road", 2))), 1);
        assert_eq!(ctx.effective_cost(&cell(Terrain::unnamed(4))), 4);
        assert_eq!(ctx.effective_cost(&cell(Terrain::open("hills", 3))), 3);
        assert_eq!(ctx.terrain_multiplier(None), 1.0);
    }

    #[test]
    fn clone_does_not_alias_multipliers() {
        let base = PathfindingContext::new().with_terrain_multiplier("forest", 2.0);
        let mut derived = base.clone();
        derived.terrain_cost_multipliers.insert("forest".into(), 3.0);
        assert_eq!(base.terrain_multiplier(Some("forest")), 2.0);
        assert_eq!(derived.terrain_multiplier(Some("forest")), 3.0);
    }

    #[test]
    fn occupied_and_reserved_goal_is_exempt() {
        let ctx = PathfindingContext::new();
        let occupied = cell(Terrain::default()).with_occupied(true);
        let reserved = cell(Terrain::default()).with_reserved(true);
        assert!(!ctx.can_enter(CellId(0), &occupied, false));
        assert!(ctx.can_enter(CellId(0), &occupied, true));
        assert!(!ctx.can_enter(CellId(0), &reserved, false));
        assert!(ctx.can_enter(CellId(0), &reserved, true));

        let through = ctx.clone().with_move_through_allies(true);
        assert!(through.can_enter(CellId(0), &occupied, false));
        assert!(!through.can_enter(CellId(0), &reserved, false));
    }

    #[test]
    fn fog_obstacles_and_walls_block() {
        let fog = PathfindingContext::new().with_require_explored(true);
        let hidden = cell(Terrain::default()).with_explored(false);
        assert!(!fog.can_enter(CellId(0), &hidden, false));
        assert!(!fog.can_enter(CellId(0), &hidden, true));

        let wall = cell(Terrain::blocked("wall"));
        assert!(!PathfindingContext::new().can_enter(CellId(0), &wall, true));
        assert!(!PathfindingContext::new().is_valid_destination(CellId(0), &wall));

        let blocker = PathfindingContext::new().with_obstacle(|id, _| id == CellId(3));
        let open = cell(Terrain::default());
        assert!(!blocker.can_enter(CellId(3), &open, false));
        assert!(blocker.can_enter(CellId(2), &open, false));
        assert!(!blocker.is_valid_destination(CellId(3), &open));
    }

    #[test]
    fn debug_hides_predicate() {
        let ctx = PathfindingContext::new().with_obstacle(|_, _| false);
        assert!(format!("{ctx:?}").contains("<predicate>"));
    }
}
