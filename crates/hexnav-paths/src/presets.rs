//! Ready-made movement profiles that fill in a [`PathfindingContext`].

use std::collections::HashMap;

use crate::context::{DEFAULT_MAX_SEARCH_NODES, PathfindingContext};

/// Plain-data traversal profile for a kind of unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementProfile {
    pub name: String,
    /// Movement points per turn; also the search budget of [`to_context`](Self::to_context).
    pub movement_points: i32,
    pub max_search_nodes: usize,
    pub allow_move_through_allies: bool,
    pub require_explored: bool,
    pub terrain_cost_multipliers: HashMap<String, f32>,
}

impl MovementProfile {
    fn new(name: &str, movement_points: i32, multipliers: &[(&str, f32)]) -> Self {
        Self {
            name: name.to_string(),
            movement_points,
            max_search_nodes: DEFAULT_MAX_SEARCH_NODES,
            allow_move_through_allies: false,
            require_explored: false,
            terrain_cost_multipliers: multipliers
                .iter()
                .map(|(t, m)| (t.to_string(), *m))
                .collect(),
        }
    }

    /// Foot soldiers: slow, indifferent to most terrain.
    pub fn infantry() -> Self {
        Self::new("Infantry", 4, &[("swamp", 1.5)])
    }

    /// Mounted units: fast on open ground, bogged down in rough terrain.
    pub fn cavalry() -> Self {
        Self::new(
            "Cavalry",
            6,
            &[("plains", 0.5), ("forest", 2.0), ("hills", 1.5), ("swamp", 2.0)],
        )
    }

    /// Air units: rough terrain is cheap and friendly units are no obstacle.
    pub fn flying() -> Self {
        let mut p = Self::new(
            "Flying",
            8,
            &[("forest", 0.5), ("hills", 0.5), ("swamp", 0.5)],
        );
        p.allow_move_through_allies = true;
        p
    }

    /// Look up a built-in profile by name, ignoring case.
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "infantry" => Some(Self::infantry()),
            "cavalry" => Some(Self::cavalry()),
            "flying" => Some(Self::flying()),
            _ => None,
        }
    }

    /// A context limited to one turn of movement under this profile.
    pub fn to_context(&self) -> PathfindingContext {
        PathfindingContext {
            max_movement_points: self.movement_points,
            max_search_nodes: self.max_search_nodes,
            require_explored: self.require_explored,
            allow_move_through_allies: self.allow_move_through_allies,
            terrain_cost_multipliers: self.terrain_cost_multipliers.clone(),
            ..PathfindingContext::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use hexnav_core::{CellId, HexGrid, Offset, Orientation};

    use super::*;
    use crate::astar::find_path;
    use crate::context::UNLIMITED_MOVEMENT;
    use crate::turns::split_into_turns;

    #[test]
    fn builtin_lookup() {
        assert_eq!(MovementProfile::builtin("CAVALRY"), Some(MovementProfile::cavalry()));
        assert_eq!(MovementProfile::builtin("dragon"), None);
        assert!(MovementProfile::flying().allow_move_through_allies);
    }

    #[test]
    fn to_context_carries_profile() {
        let ctx = MovementProfile::cavalry().to_context();
        assert_eq!(ctx.max_movement_points, 6);
        assert_eq!(ctx.terrain_multiplier(Some("forest")), 2.0);
        assert!(!ctx.enable_diagnostics);
    }

    #[test]
    fn profiles_price_terrain_differently() {
        let g = HexGrid::from_rows(Orientation::PointyTop, &["fffff"]).unwrap();
        let at = |c| g.id_at(Offset::new(c, 0)).unwrap();
        let cost = |p: MovementProfile| {
            let ctx = p.to_context().with_max_movement_points(UNLIMITED_MOVEMENT);
            find_path(&g, at(0), at(4), &ctx).total_cost()
        };
        assert_eq!(cost(MovementProfile::infantry()), 8);
        assert_eq!(cost(MovementProfile::cavalry()), 16);
        assert_eq!(cost(MovementProfile::flying()), 4);
    }

    #[test]
    fn multi_turn_plan_with_profile() {
        let g = HexGrid::from_rows(Orientation::FlatTop, &["..........", ".........."]).unwrap();
        let profile = MovementProfile::infantry();
        let ctx = profile.to_context().with_max_movement_points(UNLIMITED_MOVEMENT);
        let path = find_path(&g, CellId(0), CellId(9), &ctx);
        assert_eq!(path.total_cost(), 9);
        let turns = split_into_turns(&g, &path, profile.movement_points, &ctx);
        assert_eq!(turns.cost_per_turn(), &[4, 4, 1]);
    }
}
