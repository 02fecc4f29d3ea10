//! The [`Terrain`] descriptor attached to every map cell.

/// Static terrain attributes of a cell.
///
/// `name` is what per-terrain cost multipliers are keyed on; unnamed
/// terrain always moves at its base cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub name: Option<String>,
    pub movement_cost: i32,
    pub walkable: bool,
}

impl Terrain {
    /// Walkable named terrain with the given base cost.
    pub fn open(name: impl Into<String>, movement_cost: i32) -> Self {
        Self {
            name: Some(name.into()),
            movement_cost,
            walkable: true,
        }
    }

    /// Walkable unnamed terrain with the given base cost.
    pub fn unnamed(movement_cost: i32) -> Self {
        Self {
            name: None,
            movement_cost,
            walkable: true,
        }
    }

    /// Named terrain nothing can walk on.
    pub fn blocked(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            movement_cost: 0,
            walkable: false,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::open("plains", 1)
    }
}
